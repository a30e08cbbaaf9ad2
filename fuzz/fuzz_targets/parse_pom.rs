#![no_main]

use arqforge_core::{DependencyCoordinate, Scope};
use arqforge_syntax::pom::PomDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(pom) = PomDocument::parse(s) {
            // Edits must always produce a document that still parses.
            let coordinate = DependencyCoordinate::new("g", "a").with_version("1").with_scope(Scope::Test);
            let edited = pom.with_dependency_added(&coordinate);
            assert!(PomDocument::parse(edited).is_ok());
        }
    }
});
