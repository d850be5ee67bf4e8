use image::{GrayImage, Luma};
use navgraph_core::repair::floor_components;
use navgraph_core::{
    node_table, synthesize, BuildOptions, Floor, FloorPlans, Node, NodeType, ObstructionMap, ObstructionParams,
    PixelScale,
};

fn opts(corridor_neighbors: usize, leaf_neighbors: usize) -> BuildOptions {
    BuildOptions { corridor_neighbors, leaf_neighbors, ..BuildOptions::default() }
}

/// 40x40 white plan with a dark vertical band x in [14, 18), y in [0, wall_bottom).
fn plan_with_band(wall_bottom: u32) -> FloorPlans {
    let mut img = GrayImage::from_pixel(40, 40, Luma([255]));
    for x in 14..18 {
        for y in 0..wall_bottom {
            img.put_pixel(x, y, Luma([0]));
        }
    }
    let mut plans = FloorPlans::new();
    plans.insert(
        Floor::new("G"),
        ObstructionMap::from_brightness(img, PixelScale::identity(), ObstructionParams::default()).unwrap(),
    );
    plans
}

#[test]
fn simple_corridor() {
    let nodes = node_table(vec![
        Node::new("corr_gf_1", "G", NodeType::Corridor, 0.0, 0.0),
        Node::new("corr_gf_2", "G", NodeType::Corridor, 10.0, 0.0),
    ]);
    let out = synthesize(&nodes, &FloorPlans::new(), &opts(1, 1)).unwrap();
    assert_eq!(out.edges.len(), 1);
    let rows = out.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].from, "corr_gf_1");
    assert_eq!(rows[0].to, "corr_gf_2");
    assert_eq!(rows[0].distance, 10.0);
    assert!(rows[0].accessible);
    assert_eq!(rows[1].from, "corr_gf_2");
    assert_eq!(rows[1].to, "corr_gf_1");
}

#[test]
fn blocked_room_attaches_to_farther_clear_corridor() {
    let nodes = node_table(vec![
        Node::new("room_gf_1", "G", NodeType::Room, 10.0, 10.0),
        Node::new("corr_gf_1", "G", NodeType::Corridor, 20.0, 10.0),
        Node::new("corr_gf_2", "G", NodeType::Corridor, 10.0, 30.0),
    ]);
    let plans = plan_with_band(15);

    let unfiltered = synthesize(&nodes, &FloorPlans::new(), &opts(1, 1)).unwrap();
    assert!(unfiltered.edges.contains("room_gf_1", "corr_gf_1"), "nearest corridor wins without a plan");

    let out = synthesize(&nodes, &plans, &opts(1, 1)).unwrap();
    assert!(!out.edges.contains("room_gf_1", "corr_gf_1"));
    assert_eq!(out.edges.get("room_gf_1", "corr_gf_2").map(|e| e.weight), Some(20.0));
    assert!(out.floors[0].filtered);
}

#[test]
fn fully_blocked_room_is_bridged_by_repair() {
    let nodes = node_table(vec![
        Node::new("room_gf_1", "G", NodeType::Room, 10.0, 10.0),
        Node::new("corr_gf_1", "G", NodeType::Corridor, 20.0, 10.0),
    ]);
    let plans = plan_with_band(40);

    let no_repair = BuildOptions { repair: false, ..opts(1, 1) };
    let out = synthesize(&nodes, &plans, &no_repair).unwrap();
    assert!(out.edges.is_empty(), "leaf attachment must respect the wall");

    let out = synthesize(&nodes, &plans, &opts(1, 1)).unwrap();
    assert_eq!(out.floors[0].leaf_edges, 0);
    assert_eq!(out.floors[0].repair_edges, 1);
    assert!(out.edges.contains("room_gf_1", "corr_gf_1"));
}

#[test]
fn stair_linking_across_floors() {
    let nodes = node_table(vec![
        Node::new("corr_gf_1", "G", NodeType::Corridor, 0.0, 0.0),
        Node::new("stair_gf_1", "G", NodeType::Stair, 5.0, 5.0),
        Node::new("corr_ff_1", "1", NodeType::Corridor, 0.0, 0.0),
        Node::new("stair_ff_1", "1", NodeType::Stair, 8.0, 9.0),
    ]);
    let out = synthesize(&nodes, &FloorPlans::new(), &BuildOptions::default()).unwrap();
    assert_eq!(out.vertical_edges, 1);
    let e = out.edges.get("stair_gf_1", "stair_ff_1").unwrap();
    assert!(!e.accessible);
    assert_eq!(e.weight, 5.0);
    assert!(!out.edges.contains("corr_gf_1", "corr_ff_1"));
}

#[test]
fn outside_node_enters_through_entrance() {
    let mut o = opts(3, 1);
    o.outside_nodes.insert("room_gf_108".to_string());

    let nodes = node_table(vec![
        Node::new("room_gf_108", "G", NodeType::Room, 0.0, 0.0).with_name("Main Field"),
        Node::new("entrance_gf_1", "G", NodeType::Entrance, 5.0, 0.0),
        Node::new("corr_gf_1", "G", NodeType::Corridor, 8.0, 0.0),
    ]);
    let out = synthesize(&nodes, &FloorPlans::new(), &o).unwrap();
    assert!(out.edges.contains("room_gf_108", "entrance_gf_1"));
    assert!(!out.edges.contains("room_gf_108", "corr_gf_1"));
    assert_eq!(out.floors[0].redirected, 1);
}

#[test]
fn outside_node_tie_prefers_entrance() {
    let mut o = opts(3, 1);
    o.outside_nodes.insert("room_gf_125".to_string());

    let nodes = node_table(vec![
        Node::new("corr_gf_1", "G", NodeType::Corridor, 0.0, 5.0),
        Node::new("room_gf_125", "G", NodeType::Room, 0.0, 0.0),
        Node::new("entrance_gf_1", "G", NodeType::Entrance, 5.0, 0.0),
    ]);
    let out = synthesize(&nodes, &FloorPlans::new(), &o).unwrap();
    assert!(out.edges.contains("room_gf_125", "entrance_gf_1"));
    assert!(!out.edges.contains("room_gf_125", "corr_gf_1"));
}

#[test]
fn outside_node_reaches_entrance_on_floor_without_corridors() {
    let mut o = opts(3, 1);
    o.repair = false;
    o.outside_nodes.insert("room_gf_108".to_string());

    let nodes = node_table(vec![
        Node::new("room_gf_108", "G", NodeType::Room, 0.0, 0.0),
        Node::new("entrance_gf_1", "G", NodeType::Entrance, 5.0, 0.0),
    ]);
    let out = synthesize(&nodes, &FloorPlans::new(), &o).unwrap();
    let e = out.edges.get("room_gf_108", "entrance_gf_1").unwrap();
    assert_eq!(e.weight, 5.0);
    assert!(e.accessible);
    assert_eq!(out.edges.len(), 1);
    assert_eq!(out.floors[0].corridors, 0);
    assert_eq!(out.floors[0].redirected, 1);
    assert_eq!(out.floors[0].repair_edges, 0);
}

#[test]
fn outside_node_falls_back_to_nearer_corridor() {
    let mut o = opts(3, 1);
    o.outside_nodes.insert("room_gf_10".to_string());

    let nodes = node_table(vec![
        Node::new("room_gf_10", "G", NodeType::Room, 0.0, 0.0),
        Node::new("corr_gf_1", "G", NodeType::Corridor, 3.0, 0.0),
        Node::new("entrance_gf_1", "G", NodeType::Entrance, 10.0, 0.0),
    ]);
    let out = synthesize(&nodes, &FloorPlans::new(), &o).unwrap();
    assert!(out.edges.contains("room_gf_10", "corr_gf_1"));
    assert!(!out.edges.contains("room_gf_10", "entrance_gf_1"));
    assert_eq!(out.floors[0].redirected, 0);
}

#[test]
fn cheaper_policy_wins_on_shared_pair() {
    // corr_1 <-> corr_2 proposed by the mesh; lower weight is kept regardless
    let nodes = node_table(vec![
        Node::new("corr_1", "G", NodeType::Corridor, 0.0, 0.0),
        Node::new("corr_2", "G", NodeType::Corridor, 3.0, 4.0),
    ]);
    let out = synthesize(&nodes, &FloorPlans::new(), &BuildOptions::default()).unwrap();
    assert_eq!(out.edges.len(), 1);
    assert_eq!(out.edges.get("corr_2", "corr_1").unwrap().weight, 5.0);
}

#[test]
fn every_floor_connected_after_repair() {
    // two corridor clusters per floor, far apart, neighbor count too small to bridge them
    let mut raw = Vec::new();
    for (floor, tag) in [("G", "gf"), ("1", "ff")] {
        for i in 0..4 {
            raw.push(Node::new(format!("corr_{tag}_{i}"), floor, NodeType::Corridor, i as f64 * 2.0, 0.0));
            raw.push(Node::new(format!("corr_{tag}_{}", i + 10), floor, NodeType::Corridor, 100.0 + i as f64 * 2.0, 0.0));
        }
        raw.push(Node::new(format!("room_{tag}_1"), floor, NodeType::Room, 50.0, 40.0));
    }
    let nodes = node_table(raw);
    let out = synthesize(&nodes, &FloorPlans::new(), &opts(1, 1)).unwrap();

    for floor in ["G", "1"] {
        let members: Vec<&Node> = nodes.values().filter(|n| n.floor == Floor::new(floor)).collect();
        assert_eq!(floor_components(&members, &out.edges).len(), 1, "floor {floor}");
    }
}
