// Copyright 2025 the Hitgraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path hit-testing.
//!
//! Paths become colliders: closed subpaths fill (with holes), open ones are hit within
//! half their stroke width. Queries can be loosely-typed descriptions.
//!
//! Run:
//! - `cargo run -p hitgraph_demos --example path_hit`

use hitgraph_geometry::ShapeDesc;
use hitgraph_scene::{Geometry, NodeDesc, QueryFilter, Scene, SceneOptions};

fn main() {
    // Device pixels are twice the logical units; queries stay logical.
    let mut scene: Scene<&str> = Scene::with_options(SceneOptions {
        dpi: 2.0,
        ..SceneOptions::default()
    });

    let _ring = scene.add(
        NodeDesc::new(Geometry::Path {
            d: "M0 0 H100 V100 H0 Z M25 25 H75 V75 H25 Z".into(),
            stroke_width: 0.0,
        })
        .with_data("ring"),
    );
    let _wave = scene.add(
        NodeDesc::new(Geometry::Path {
            d: "M0 150 C25 110 75 190 100 150".into(),
            stroke_width: 8.0,
        })
        .with_data("wave"),
    );
    let _badge = scene.add(
        NodeDesc::new(Geometry::Path {
            d: "M150 50 a30 30 0 1 0 60 0 a30 30 0 1 0 -60 0 Z".into(),
            stroke_width: 0.0,
        })
        .with_transform("rotate(10, 180, 50)")
        .with_data("badge"),
    );

    let probes = [
        ShapeDesc::point(10.0, 10.0),
        ShapeDesc::point(50.0, 50.0),
        ShapeDesc::point(50.0, 150.0),
        ShapeDesc::circle(180.0, 50.0, 5.0),
        ShapeDesc::rect(60.0, 60.0, 140.0, 10.0),
        ShapeDesc::default(),
    ];
    for probe in &probes {
        let names: Vec<_> = scene
            .find_all_desc(probe, QueryFilter::default())
            .iter()
            .filter_map(|h| scene.data(h.node).copied())
            .collect();
        println!("{probe:?}\n  -> {names:?}");
    }

    let hole = scene.find_all_desc(&ShapeDesc::point(50.0, 50.0), QueryFilter::default());
    assert!(hole.is_empty(), "the ring's hole is empty space");
}
