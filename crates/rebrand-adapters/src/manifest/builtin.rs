//! Built-in manifest for the Android + Rust template.
//!
//! Used when a checkout has no `rebrand.toml` and the caller asks for the
//! preset, and as the starter written by `rebrand manifest`.

use std::path::PathBuf;

use super::{Manifest, TemplateSection};

pub const TEMPLATE_ID: &str = "io.github.bamboo.krust";
pub const TEMPLATE_NAME: &str = "Krust";

/// Files that mention the template identifier, relative to the project root.
pub const FILES: &[&str] = &[
    "app/build.gradle.kts",
    "app/src/androidTest/java/io/github/bamboo/krust/ExampleInstrumentedTest.kt",
    "app/src/test/java/io/github/bamboo/krust/JsonEncodingTest.kt",
    "app/src/main/res/values/strings.xml",
    "app/src/main/res/values/themes.xml",
    "app/src/main/AndroidManifest.xml",
    "app/src/main/java/io/github/bamboo/krust/ui/theme/Theme.kt",
    "app/src/main/java/io/github/bamboo/krust/ui/theme/Shape.kt",
    "app/src/main/java/io/github/bamboo/krust/ui/theme/Color.kt",
    "app/src/main/java/io/github/bamboo/krust/ui/theme/Type.kt",
    "app/src/main/java/io/github/bamboo/krust/MainActivity.kt",
    "app/src/main/java/io/github/bamboo/krust/protocol.kt",
    "app/src/main/java/io/github/bamboo/krust/MainScreen.kt",
    "app/src/main/java/io/github/bamboo/krust/Backend.kt",
    "backend/src/lib.rs",
    "README.md",
    "settings.gradle.kts",
];

/// Source-set roots whose package directories are relocated.
pub const SOURCE_ROOTS: &[&str] = &[
    "app/src/androidTest/java",
    "app/src/test/java",
    "app/src/main/java",
];

pub fn manifest() -> Manifest {
    Manifest {
        files: FILES.iter().map(PathBuf::from).collect(),
        source_roots: SOURCE_ROOTS.iter().map(PathBuf::from).collect(),
        template: TemplateSection {
            id: TEMPLATE_ID.into(),
            name: TEMPLATE_NAME.into(),
        },
    }
}
