//! The point-sprite shader must parse and validate, and its vertex inputs
//! must line up with the particle record layout.

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};
use pointburst::SHADER_SOURCE;

fn parse() -> naga::Module {
    match wgsl::parse_str(SHADER_SOURCE) {
        Ok(module) => module,
        Err(err) => panic!("{}", err.emit_to_string(SHADER_SOURCE)),
    }
}

#[test]
fn test_shader_validates() {
    let module = parse();
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    if let Err(err) = validator.validate(&module) {
        panic!("Render shader error: {}", err);
    }
}

#[test]
fn test_shader_has_expected_entry_points() {
    let module = parse();
    let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}

#[test]
fn test_vertex_inputs_are_position_then_life() {
    let module = parse();
    let vs = module
        .entry_points
        .iter()
        .find(|e| e.name == "vs_main")
        .expect("vs_main entry point");

    let locations: Vec<(u32, &naga::TypeInner)> = vs
        .function
        .arguments
        .iter()
        .filter_map(|arg| match arg.binding {
            Some(naga::Binding::Location { location, .. }) => {
                Some((location, &module.types[arg.ty].inner))
            }
            _ => None,
        })
        .collect();

    assert_eq!(locations.len(), 2);
    assert!(matches!(
        locations[0],
        (0, naga::TypeInner::Vector { size: naga::VectorSize::Bi, .. })
    ));
    assert!(matches!(locations[1], (1, naga::TypeInner::Scalar(_))));
}
