#![no_main]

use libfuzzer_sys::fuzz_target;
use rtview_harness::{Session, parse_script};
use rtview_model::TriangleModel;

// Arbitrary scripts may fail to parse or fail an expectation, but never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(lines) = parse_script(text) else {
        return;
    };
    let mut session = Session::new(&TriangleModel::default());
    let _ = session.run(&lines);
});
