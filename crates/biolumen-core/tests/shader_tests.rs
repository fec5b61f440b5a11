// Parse and validate every WGSL module so shader typos fail on the host.

use biolumen_core::{BACKDROP_WGSL, JELLY_WGSL, POST_WGSL};
use naga::valid::{Capabilities, ValidationFlags, Validator};

fn validate(name: &str, source: &str) -> naga::Module {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{name}: {}", e.emit_to_string(source)));
    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .unwrap_or_else(|e| panic!("{name}: {e:?}"));
    module
}

fn entry_points(module: &naga::Module) -> Vec<&str> {
    module.entry_points.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn jelly_shader_is_valid() {
    let m = validate("jelly.wgsl", JELLY_WGSL);
    let eps = entry_points(&m);
    assert!(eps.contains(&"vs_particle"));
    assert!(eps.contains(&"fs_particle"));
}

#[test]
fn backdrop_shader_is_valid() {
    let m = validate("backdrop.wgsl", BACKDROP_WGSL);
    let eps = entry_points(&m);
    assert!(eps.contains(&"vs_fullscreen"));
    assert!(eps.contains(&"fs_backdrop"));
}

#[test]
fn post_shader_is_valid() {
    let m = validate("post.wgsl", POST_WGSL);
    let eps = entry_points(&m);
    for ep in ["vs_fullscreen", "fs_bright", "fs_blur", "fs_composite"] {
        assert!(eps.contains(&ep), "missing {ep}");
    }
}
