// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Build a small scene, move a node, and hit-test with points and areas.
//!
//! Run:
//! - `cargo run -p hitgraph_demos --example scene_basics`

use hitgraph_geometry::{Circle, Rect, Shape};
use hitgraph_scene::{ColliderSpec, Geometry, NodeDesc, QueryFilter, Scene};
use kurbo::Point;

fn describe(scene: &Scene<&'static str>, q: &Shape) -> Vec<&'static str> {
    let names: Vec<_> = scene
        .find_all(q, QueryFilter::INTERACTIVE)
        .iter()
        .filter_map(|h| scene.data(h.node).copied())
        .collect();
    println!("{q:?} -> {names:?}");
    names
}

fn main() {
    let mut scene: Scene<&'static str> = Scene::new();

    // A toolbar: hit-tested as a box, then per button.
    let toolbar = scene.add(
        NodeDesc::group()
            .with_collider(ColliderSpec::Bounds)
            .with_transform("translate(10, 10)")
            .with_data("toolbar"),
    );
    let save = scene
        .insert(
            Some(toolbar),
            NodeDesc::new(Geometry::Rect(Rect::new(0.0, 0.0, 40.0, 20.0))).with_data("save"),
        )
        .unwrap();
    let open = scene
        .insert(
            Some(toolbar),
            NodeDesc::new(Geometry::Rect(Rect::new(50.0, 0.0, 40.0, 20.0))).with_data("open"),
        )
        .unwrap();
    let knob = scene.add(
        NodeDesc::new(Geometry::Circle(Circle::new(0.0, 0.0, 15.0)))
            .with_transform("translate(200, 100)")
            .with_data("knob"),
    );

    let filter = QueryFilter::INTERACTIVE;
    assert_eq!(describe(&scene, &Shape::Point(Point::new(20.0, 20.0))), ["toolbar", "save"]);
    assert_eq!(describe(&scene, &Shape::Point(Point::new(205.0, 95.0))), ["knob"]);

    // Drag the knob onto the toolbar.
    scene.set_transform(knob, "translate(75, 20)").unwrap();
    let hit = scene
        .find_any(&Shape::Point(Point::new(75.0, 25.0)), filter)
        .unwrap();
    println!("front hit: {:?}", scene.data(hit.node));
    assert_eq!(hit.node, toolbar);

    // A rubber-band selection over both buttons.
    let band = Shape::Rect(Rect::new(0.0, 0.0, 120.0, 15.0));
    let hits = scene.find_all(&band, filter);
    let nodes: Vec<_> = hits.iter().map(|h| h.node).collect();
    assert_eq!(nodes, vec![toolbar, save, open, knob]);
    println!("button chain: {:?}", hits[1].path());
}
