use crate::geometry::distance;
use crate::models::Node;

/// Ranks `pool` by distance to `target`, nearest first.
///
/// The target itself (by id) is skipped, candidates farther than `max_radius`
/// are dropped and equal distances keep pool order. At most `k` results.
pub fn nearest<'a>(target: &Node, pool: &[&'a Node], k: usize, max_radius: Option<f64>) -> Vec<(f64, &'a Node)> {
    let mut ranked = rank(target, pool, max_radius);
    ranked.truncate(k);
    ranked
}

/// Like [`nearest`] but skips candidates for which `blocked` returns true,
/// continuing down the ranking until `k` clear candidates are found.
pub fn nearest_clear<'a, F>(
    target: &Node,
    pool: &[&'a Node],
    k: usize,
    max_radius: Option<f64>,
    mut blocked: F,
) -> Vec<(f64, &'a Node)>
where
    F: FnMut(&Node, &Node) -> bool,
{
    if k == 0 { return Vec::new(); }
    let mut out = Vec::with_capacity(k);
    for (d, cand) in rank(target, pool, max_radius) {
        if blocked(target, cand) { continue; }
        out.push((d, cand));
        if out.len() == k { break; }
    }
    out
}

fn rank<'a>(target: &Node, pool: &[&'a Node], max_radius: Option<f64>) -> Vec<(f64, &'a Node)> {
    let limit = max_radius.unwrap_or(f64::INFINITY);
    let mut ranked: Vec<(f64, &Node)> = pool
        .iter()
        .filter(|c| c.id != target.id)
        .map(|c| (distance(target.pos, c.pos), *c))
        .filter(|(d, _)| *d <= limit)
        .collect();
    // stable sort keeps pool order on ties
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeType;

    fn corridor(id: &str, x: f64, y: f64) -> Node {
        Node::new(id, "G", NodeType::Corridor, x, y)
    }

    fn ids(v: &[(f64, &Node)]) -> Vec<String> {
        v.iter().map(|(_, n)| n.id.clone()).collect()
    }

    #[test]
    fn ascending_and_truncated() {
        let t = corridor("t", 0.0, 0.0);
        let a = corridor("a", 5.0, 0.0);
        let b = corridor("b", 1.0, 0.0);
        let c = corridor("c", 3.0, 0.0);
        let got = nearest(&t, &[&a, &b, &c], 2, None);
        assert_eq!(ids(&got), vec!["b", "c"]);
        assert_eq!(got[0].0, 1.0);
    }

    #[test]
    fn excludes_target_and_respects_radius() {
        let t = corridor("t", 0.0, 0.0);
        let a = corridor("a", 10.0, 0.0);
        let b = corridor("b", 10.5, 0.0);
        let got = nearest(&t, &[&t, &a, &b], 5, Some(10.0));
        assert_eq!(ids(&got), vec!["a"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let t = corridor("t", 0.0, 0.0);
        let a = corridor("a", 0.0, 4.0);
        let b = corridor("b", 4.0, 0.0);
        let c = corridor("c", -4.0, 0.0);
        assert_eq!(ids(&nearest(&t, &[&c, &a, &b], 3, None)), vec!["c", "a", "b"]);
        assert_eq!(ids(&nearest(&t, &[&b, &c, &a], 2, None)), vec!["b", "c"]);
    }

    #[test]
    fn clear_variant_falls_through_to_next_candidate() {
        let t = corridor("t", 0.0, 0.0);
        let a = corridor("a", 1.0, 0.0);
        let b = corridor("b", 2.0, 0.0);
        let c = corridor("c", 3.0, 0.0);
        let got = nearest_clear(&t, &[&a, &b, &c], 2, None, |_, n| n.id == "a");
        assert_eq!(ids(&got), vec!["b", "c"]);
        let none = nearest_clear(&t, &[&a], 1, None, |_, _| true);
        assert!(none.is_empty());
    }

    #[test]
    fn zero_k_is_empty() {
        let t = corridor("t", 0.0, 0.0);
        let a = corridor("a", 1.0, 0.0);
        assert!(nearest(&t, &[&a], 0, None).is_empty());
        assert!(nearest_clear(&t, &[&a], 0, None, |_, _| false).is_empty());
    }
}
