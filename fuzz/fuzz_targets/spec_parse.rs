#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };

    // Any schema that loads must satisfy the slot invariants.
    if let Ok(project) = drskit_specs::parse_project_specs(s) {
        for spec in project.specs.values() {
            for (i, slot) in spec.slots.iter().enumerate() {
                assert_eq!(slot.position, i);
            }
            let first_optional = spec.slots.iter().position(|s| !s.required);
            if let Some(first) = first_optional {
                assert!(spec.slots[first..].iter().all(|s| !s.required));
            }
        }
    }
});
