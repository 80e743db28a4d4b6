//! Shared helpers for the integration tests.

use geom_shared::math::Vec3;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Panics with both values when `a` and `b` differ by more than `eps`.
#[track_caller]
pub fn assert_vec3_close(a: Vec3, b: Vec3, eps: f32) {
    assert!(
        (a - b).length() <= eps,
        "expected {:?} to be within {} of {:?}",
        a,
        eps,
        b
    );
}
