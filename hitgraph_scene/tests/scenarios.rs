// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end queries over small scenes.

use hitgraph_geometry::{Circle, Rect, Shape, ShapeDesc};
use hitgraph_scene::{
    ColliderSpec, Collision, Geometry, NodeDesc, NodeFlags, NodeId, QueryFilter, Scene,
    SceneOptions, TreeError,
};
use kurbo::Point;

fn rect(x: f64, y: f64, w: f64, h: f64) -> NodeDesc<u32> {
    NodeDesc::new(Geometry::Rect(Rect::new(x, y, w, h)))
}

fn at(x: f64, y: f64) -> Shape {
    Shape::Point(Point::new(x, y))
}

fn ids(hits: &[Collision]) -> Vec<NodeId> {
    hits.iter().map(|h| h.node).collect()
}

fn three_rects(scene: &mut Scene<u32>) -> [NodeId; 3] {
    [
        scene.add(rect(0.0, 0.0, 100.0, 100.0).with_data(1)),
        scene.add(rect(50.0, 50.0, 100.0, 100.0).with_data(2)),
        scene.add(rect(500.0, 500.0, 100.0, 100.0).with_data(3)),
    ]
}

#[test]
fn overlapping_rects_in_insertion_order() {
    let mut scene = Scene::new();
    let [a, b, _] = three_rects(&mut scene);

    let hits = scene.find_all(&at(60.0, 60.0), QueryFilter::default());
    assert_eq!(ids(&hits), vec![a, b]);
    let data: Vec<_> = hits.iter().filter_map(|h| scene.data(h.node)).collect();
    assert_eq!(data, vec![&1, &2]);
    assert!(hits.iter().all(|h| h.parent.is_none()));

    let any = scene.find_any(&at(60.0, 60.0), QueryFilter::default());
    assert_eq!(any.map(|h| h.node), Some(a));
}

#[test]
fn area_queries() {
    let mut scene = Scene::new();
    let [a, b, c] = three_rects(&mut scene);

    let window = Shape::Rect(Rect::new(120.0, 120.0, 400.0, 400.0));
    assert_eq!(ids(&scene.find_all(&window, QueryFilter::default())), vec![b, c]);

    let probe = Shape::Circle(Circle::new(-5.0, -5.0, 8.0));
    assert_eq!(ids(&scene.find_all(&probe, QueryFilter::default())), vec![a]);
}

#[test]
fn input_is_shared_and_unscaled() {
    let mut scene = Scene::with_options(SceneOptions {
        dpi: 3.0,
        ..SceneOptions::default()
    });
    let [_, _, _] = three_rects(&mut scene);
    let query = at(60.0, 60.0);
    let hits = scene.find_all(&query, QueryFilter::default());
    assert_eq!(hits.len(), 2);
    assert_eq!(*hits[0].input, query);
    assert!(std::sync::Arc::ptr_eq(&hits[0].input, &hits[1].input));
}

#[test]
fn nested_bounds_chain() {
    let mut scene = Scene::new();
    let outer = scene.add(NodeDesc::group().with_collider(ColliderSpec::Bounds));
    let inner = scene
        .insert(
            Some(outer),
            NodeDesc::group()
                .with_collider(ColliderSpec::Bounds)
                .with_transform("translate(10, 10)"),
        )
        .unwrap();
    let leaf = scene.insert(Some(inner), rect(0.0, 0.0, 20.0, 20.0)).unwrap();

    let hits = scene.find_all(&at(15.0, 15.0), QueryFilter::default());
    assert_eq!(ids(&hits), vec![outer, inner, leaf]);

    let deepest = &hits[2];
    assert_eq!(deepest.depth(), scene.ancestors(leaf).len() - 1);
    assert_eq!(deepest.path(), vec![outer, inner, leaf]);
    let chain: Vec<_> = deepest.ancestors().map(|c| c.node).collect();
    assert_eq!(chain, vec![inner, outer]);

    // The leaf sits at (10, 10)..(30, 30); the outer box ends there as well.
    assert!(scene.find_all(&at(5.0, 5.0), QueryFilter::default()).is_empty());
}

#[test]
fn tree_integrity() {
    let mut scene = Scene::new();
    let a = scene.add(NodeDesc::<u32>::group());
    let b = scene.insert(Some(a), NodeDesc::group()).unwrap();
    let c = scene.insert(Some(b), NodeDesc::group()).unwrap();

    assert_eq!(scene.add_child(c, a), Err(TreeError::Cycle { parent: c, child: a }));
    assert_eq!(scene.add_child(b, b), Err(TreeError::SelfParent(b)));
    assert_eq!(scene.add_child(a, scene.stage()), Err(TreeError::Stage));
    assert_eq!(
        scene.remove_child(a, c),
        Err(TreeError::NotAChild { parent: a, child: c })
    );

    assert_eq!(scene.ancestors(c), &[b, a, scene.stage()]);
    scene.remove_child(a, b).unwrap();
    assert!(scene.ancestors(b).is_empty());
    assert!(!scene.children(a).contains(&b));
    assert_eq!(scene.parent(b), None);
    assert_eq!(scene.ancestors(c), &[b]);
    assert!(scene.is_alive(c));

    scene.remove(b).unwrap();
    assert!(!scene.is_alive(c));
    assert_eq!(scene.remove(scene.stage()), Err(TreeError::Stage));
    assert_eq!(scene.add_child(a, c), Err(TreeError::StaleNode(c)));
}

#[test]
fn detached_subtree_is_not_queried() {
    let mut scene = Scene::new();
    let a = scene.add(rect(0.0, 0.0, 10.0, 10.0));
    scene.remove_child(scene.stage(), a).unwrap();
    assert!(scene.find_all(&at(5.0, 5.0), QueryFilter::default()).is_empty());

    // Still queryable on its own.
    let hits = scene.find_all_from(a, &at(5.0, 5.0), QueryFilter::default());
    assert_eq!(ids(&hits), vec![a]);

    scene.add_child(scene.stage(), a).unwrap();
    assert_eq!(ids(&scene.find_all(&at(5.0, 5.0), QueryFilter::default())), vec![a]);
}

#[test]
fn front_child_reports_topmost_only() {
    let mut scene = Scene::new();
    let group = scene.add(
        NodeDesc::group()
            .with_collider(ColliderSpec::FrontChild)
            .with_transform("translate(100, 0)"),
    );
    let back = scene.insert(Some(group), rect(0.0, 0.0, 40.0, 40.0)).unwrap();
    let wrap = scene.insert(Some(group), NodeDesc::group()).unwrap();
    let front = scene.insert(Some(wrap), rect(20.0, 20.0, 40.0, 40.0)).unwrap();

    let hits = scene.find_all(&at(130.0, 30.0), QueryFilter::default());
    assert_eq!(ids(&hits), vec![front]);
    assert_eq!(hits[0].path(), vec![group, wrap, front]);

    let hits = scene.find_all(&at(105.0, 5.0), QueryFilter::default());
    assert_eq!(ids(&hits), vec![back]);

    // Hiding the wrapper hides its descendants from the front-child scan.
    scene.set_flags(wrap, NodeFlags::PICKABLE).unwrap();
    let hits = scene.find_all(&at(130.0, 30.0), QueryFilter::INTERACTIVE);
    assert_eq!(ids(&hits), vec![back]);
}

#[test]
fn collection_counts_once() {
    let mut scene: Scene = Scene::new();
    let multi = scene.add(NodeDesc::group().with_collider(ColliderSpec::Collection(vec![
        Shape::Circle(Circle::new(0.0, 0.0, 10.0)),
        Shape::Circle(Circle::new(5.0, 0.0, 10.0)),
        Shape::Rect(Rect::new(50.0, 50.0, 5.0, 5.0)),
    ])));
    assert_eq!(ids(&scene.find_all(&at(3.0, 0.0), QueryFilter::default())), vec![multi]);
    assert_eq!(ids(&scene.find_all(&at(52.0, 52.0), QueryFilter::default())), vec![multi]);
    assert!(scene.find_all(&at(30.0, 30.0), QueryFilter::default()).is_empty());
}

#[test]
fn dpi_does_not_change_logical_results() {
    let queries = [at(60.0, 60.0), at(550.0, 550.0), at(150.0, 10.0)];
    let mut plain = Scene::new();
    let mut dense = Scene::with_options(SceneOptions {
        dpi: 2.0,
        ..SceneOptions::default()
    });
    three_rects(&mut plain);
    three_rects(&mut dense);
    for q in &queries {
        assert_eq!(
            ids(&plain.find_all(q, QueryFilter::default())),
            ids(&dense.find_all(q, QueryFilter::default())),
            "query {q:?}"
        );
    }

    dense.set_dpi(0.5);
    assert_eq!(dense.find_all(&at(60.0, 60.0), QueryFilter::default()).len(), 2);
}

#[test]
fn visibility_prunes_and_pickability_passes_through() {
    let mut scene = Scene::new();
    let hidden = scene.add(rect(0.0, 0.0, 100.0, 100.0).with_flags(NodeFlags::PICKABLE));
    let _under_hidden = scene.insert(Some(hidden), rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    let ghost = scene.add(rect(0.0, 0.0, 100.0, 100.0).with_flags(NodeFlags::VISIBLE));
    let under_ghost = scene.insert(Some(ghost), rect(0.0, 0.0, 10.0, 10.0)).unwrap();

    let hits = scene.find_all(&at(5.0, 5.0), QueryFilter::INTERACTIVE);
    assert_eq!(ids(&hits), vec![under_ghost]);
    assert_eq!(hits[0].path(), vec![ghost, under_ghost]);

    let hits = scene.find_all(&at(5.0, 5.0), QueryFilter::default());
    assert_eq!(ids(&hits), vec![hidden, ghost]);
}

#[test]
fn empty_scene_and_unknown_queries() {
    let mut scene: Scene<u32> = Scene::new();
    assert!(scene.find_all(&at(0.0, 0.0), QueryFilter::default()).is_empty());
    assert!(scene.find_any(&at(0.0, 0.0), QueryFilter::default()).is_none());

    three_rects(&mut scene);
    assert!(scene.find_all_desc(&ShapeDesc::default(), QueryFilter::default()).is_empty());
    let degenerate = Shape::Rect(Rect::new(10.0, 10.0, 0.0, 0.0));
    assert!(scene.find_all(&degenerate, QueryFilter::default()).is_empty());

    let desc = ShapeDesc {
        x: Some(60.0),
        y: Some(60.0),
        ..ShapeDesc::default()
    };
    assert_eq!(scene.find_all_desc(&desc, QueryFilter::default()).len(), 2);
}

#[test]
fn rotated_node() {
    let mut scene = Scene::new();
    let diamond = scene.add(rect(0.0, 0.0, 10.0, 10.0).with_transform("rotate(45)"));

    // The square's diagonal now points straight down.
    assert_eq!(ids(&scene.find_all(&at(0.0, 7.0), QueryFilter::default())), vec![diamond]);
    assert!(scene.find_all(&at(7.0, 0.0), QueryFilter::default()).is_empty());

    scene.set_transform(diamond, "rotate(-45)").unwrap();
    assert_eq!(ids(&scene.find_all(&at(7.0, 0.0), QueryFilter::default())), vec![diamond]);
}

#[test]
fn path_with_hole() {
    let mut scene: Scene = Scene::new();
    let frame = scene.add(NodeDesc::new(Geometry::Path {
        d: "M0 0 H100 V100 H0 Z M30 30 H70 V70 H30 Z".into(),
        stroke_width: 0.0,
    }));

    assert_eq!(ids(&scene.find_all(&at(10.0, 10.0), QueryFilter::default())), vec![frame]);
    assert!(scene.find_all(&at(50.0, 50.0), QueryFilter::default()).is_empty());

    // A query area spanning the hole's edge still hits.
    let window = Shape::Rect(Rect::new(40.0, 40.0, 40.0, 5.0));
    assert_eq!(ids(&scene.find_all(&window, QueryFilter::default())), vec![frame]);
    let inside_hole = Shape::Circle(Circle::new(50.0, 50.0, 5.0));
    assert!(scene.find_all(&inside_hole, QueryFilter::default()).is_empty());
}

#[test]
fn stroked_open_path() {
    let mut scene: Scene = Scene::new();
    let wire = scene.add(NodeDesc::new(Geometry::Path {
        d: "M0 0 L100 0".into(),
        stroke_width: 10.0,
    }));
    assert_eq!(ids(&scene.find_all(&at(50.0, 4.0), QueryFilter::default())), vec![wire]);
    assert!(scene.find_all(&at(50.0, 6.0), QueryFilter::default()).is_empty());
}

#[test]
fn bounds_collider_on_leaves() {
    let mut scene = Scene::new();
    let square = scene.add(rect(0.0, 0.0, 10.0, 10.0).with_collider(ColliderSpec::Bounds));
    let disc = scene.add(
        NodeDesc::new(Geometry::Circle(Circle::new(50.0, 50.0, 10.0)))
            .with_collider(ColliderSpec::Bounds),
    );

    assert_eq!(ids(&scene.find_all(&at(5.0, 5.0), QueryFilter::default())), vec![square]);

    // Outside the circle but inside its box.
    assert_eq!(ids(&scene.find_all(&at(59.0, 59.0), QueryFilter::default())), vec![disc]);
    assert!(scene.find_all(&at(61.0, 50.0), QueryFilter::default()).is_empty());
}

#[test]
fn stroked_polyline_with_missing_values() {
    let mut scene: Scene = Scene::new();
    let line = scene.add(NodeDesc::new(Geometry::Polyline {
        points: vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 0.0), Point::new(10.0, 0.0)],
        stroke_width: 2.0,
    }));
    let _gap = scene.add(NodeDesc::new(Geometry::Polyline {
        points: vec![Point::new(f64::NAN, f64::NAN), Point::new(20.0, 20.0)],
        stroke_width: 2.0,
    }));
    assert_eq!(ids(&scene.find_all(&at(5.0, 0.5), QueryFilter::default())), vec![line]);
    assert!(scene.find_all(&at(20.0, 20.0), QueryFilter::default()).is_empty());
}
