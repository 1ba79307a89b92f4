use drape::{Anchors, Cloth, ClothConfig, GridLayout, Vec3};

fn hanging_config() -> ClothConfig<f32> {
    ClothConfig::hanging().with_layout(
        GridLayout::new(10, 10, 0.2).with_origin(Vec3::new(-1.0, 4.0, 0.0)),
    )
}

#[test]
fn anchored_corners_hold_while_the_rest_sags() {
    let mut cloth = Cloth::new(hanging_config()).unwrap();
    let grid = cloth.grid();
    let anchors = [0, 10];
    let far_corner = grid.index(10, 10);
    let far_initial = grid.position_of(far_corner);

    // ~10 seconds at 60 Hz, fed as irregular frame times.
    for i in 0..600 {
        let frame = if i % 3 == 0 { 1.0 / 45.0 } else { 1.0 / 75.0 };
        cloth.advance(frame);
    }

    for &i in &anchors {
        assert!(cloth.grid().is_fixed(i));
        assert_eq!(
            cloth.grid().position_of(i),
            cloth.grid().rest_position(i),
            "anchor {} moved",
            i,
        );
    }

    let far = cloth.grid().position_of(far_corner);
    assert!(
        far.y < far_initial.y - 0.1,
        "far corner should have dropped below {}, but y is {}",
        far_initial.y,
        far.y,
    );
}

#[test]
fn stretch_stays_bounded_while_swinging() {
    let mut cloth = Cloth::new(hanging_config()).unwrap();
    let step = cloth.scheduler().step();
    for i in 0..1200 {
        cloth.advance(step);
        if i % 10 == 0 {
            let ratio = cloth.max_stretch_ratio();
            assert!(ratio < 1.2, "step {}: stretch ratio {}", i, ratio);
        }
    }
    for p in cloth.positions() {
        assert!(p.is_finite());
    }
}

#[test]
fn dragged_anchor_stays_where_it_was_put() {
    let mut cloth = Cloth::new(hanging_config()).unwrap();
    let target = Vec3::new(-1.5, 4.5, 0.3);
    cloth.set_external_position(0, target);
    cloth.clear_velocity(0);
    for _ in 0..120 {
        cloth.step();
    }
    assert_eq!(cloth.grid().position_of(0), target);
}

#[test]
fn dragging_a_free_particle_moves_it() {
    let mut cloth = Cloth::new(hanging_config().with_anchors(Anchors::TopCorners)).unwrap();
    let idx = cloth.grid().index(5, 5);
    let picked = cloth.pick_nearest(cloth.grid().position_of(idx) + Vec3::new(0.02, 0.0, 0.0), 0.1);
    assert_eq!(picked, Some(idx));

    let target = cloth.grid().position_of(idx) + Vec3::new(0.0, 0.5, 0.0);
    cloth.set_external_position(idx, target);
    cloth.clear_velocity(idx);
    assert_eq!(cloth.grid().velocity_of(idx), Vec3::zero());
    assert_eq!(cloth.grid().position_of(idx), target);

    assert_eq!(cloth.pick_nearest(Vec3::new(50.0, 50.0, 50.0), 0.2), None);
}

#[test]
fn released_anchor_falls() {
    let mut cloth = Cloth::new(hanging_config()).unwrap();
    cloth.set_fixed(0, false);
    for _ in 0..120 {
        cloth.step();
    }
    assert!(cloth.grid().position_of(0).y < cloth.grid().rest_position(0).y);
}
