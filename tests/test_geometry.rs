use boom::geometry::*;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ARENA: Vec2 = Vec2::new(800.0, 600.0);

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn close(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < 1e-4
}

// ── wrap_position ─────────────────────────────────────────────────────────────

#[test]
fn wrap_inside_is_unchanged() {
    assert_eq!(wrap_position(Vec2::new(10.0, 20.0), ARENA), Vec2::new(10.0, 20.0));
}

#[test]
fn wrap_past_far_edges() {
    assert_eq!(wrap_position(Vec2::new(805.0, 610.0), ARENA), Vec2::new(5.0, 10.0));
}

#[test]
fn wrap_past_near_edges() {
    assert_eq!(wrap_position(Vec2::new(-5.0, -10.0), ARENA), Vec2::new(795.0, 590.0));
}

// ── Rotation & heading ────────────────────────────────────────────────────────

#[test]
fn positive_rotation_turns_clockwise_on_screen() {
    assert!(close(rotate_degrees(UP, 90.0), Vec2::new(1.0, 0.0)));
    assert!(close(rotate_degrees(UP, -90.0), Vec2::new(-1.0, 0.0)));
}

#[test]
fn rotation_preserves_length() {
    let v = Vec2::new(3.0, 4.0);
    assert!((rotate_degrees(v, 37.0).length() - 5.0).abs() < 1e-4);
}

#[test]
fn heading_is_measured_clockwise_from_up() {
    assert!((heading_degrees(UP) - 0.0).abs() < 1e-3);
    assert!((heading_degrees(Vec2::new(1.0, 0.0)) - 90.0).abs() < 1e-3);
    assert!((heading_degrees(Vec2::new(0.0, 1.0)) - 180.0).abs() < 1e-3);
    assert!((heading_degrees(Vec2::new(-1.0, 0.0)) - 270.0).abs() < 1e-3);
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(0.0, 0.0, 800.0, 600.0);
    assert!(r.contains(Vec2::new(0.0, 0.0)));
    assert!(r.contains(Vec2::new(799.9, 599.9)));
    assert!(!r.contains(Vec2::new(800.0, 10.0)));
    assert!(!r.contains(Vec2::new(10.0, 600.0)));
    assert!(!r.contains(Vec2::new(-0.1, 10.0)));
}

#[test]
fn rect_normalize_flips_negative_width() {
    let r = Rect::new(100.0, 50.0, -20.0, 10.0).normalized();
    assert_eq!(r, Rect::new(80.0, 50.0, 20.0, 10.0));
}

// ── Random generators ─────────────────────────────────────────────────────────

#[test]
fn random_positions_stay_in_arena() {
    let mut rng = seeded_rng();
    let bounds = Rect::new(0.0, 0.0, ARENA.x, ARENA.y);
    for _ in 0..500 {
        let p = random_position(ARENA, &mut rng);
        assert!(bounds.contains(p), "{p:?} outside arena");
        assert_eq!(p.x.fract(), 0.0);
        assert_eq!(p.y.fract(), 0.0);
    }
}

#[test]
fn random_velocity_speed_in_range() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let speed = random_velocity(3, 5, &mut rng).length();
        assert!(speed > 3.0 - 1e-3 && speed < 5.0 + 1e-3, "speed {speed}");
    }
}

#[test]
fn random_time_in_range_with_two_decimals() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let t = random_time(500.0, 700.0, &mut rng);
        assert!((500.0..=700.0).contains(&t));
        let hundredths = t * 100.0;
        assert!((hundredths - hundredths.round()).abs() < 0.05);
    }
}

#[test]
fn roll_chance_of_one_always_hits() {
    let mut rng = seeded_rng();
    assert!((0..50).all(|_| roll_chance(1, &mut rng)));
}

#[test]
fn roll_chance_of_twenty_hits_sometimes() {
    let mut rng = seeded_rng();
    let hits = (0..2000).filter(|_| roll_chance(20, &mut rng)).count();
    // expected ≈ 100
    assert!(hits > 40 && hits < 200, "hits {hits}");
}
