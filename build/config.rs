/**
Converts environment variables into Cargo cfgs that can then be used in code.

Every cfg the binder understands is listed in `KNOWN` along with where its value
comes from. The library and its fuzz harness both include this file, so they
always agree on what a `checked` build is.
*/
pub mod config {
    use std::{collections::BTreeSet, env};

    /**
    Where the value of a cfg comes from.
    */
    enum Source {
        /**
        Enabled when a variable set by Cargo has a specific value.
        */
        Cargo(&'static str, &'static str),
        /**
        Enabled when `SQUIRRELBIND_{CFG}` is set to anything other than `0`.
        */
        Flag,
        /**
        Enabled when the compiler accepts `#![feature]` attributes.
        */
        Nightly,
    }

    const KNOWN: &[(&str, Source)] = &[
        ("release", Source::Cargo("PROFILE", "release")),
        ("debug", Source::Cargo("PROFILE", "debug")),
        ("unstable", Source::Nightly),
        // assert the binder's cursor invariants as it walks tokens
        ("checked", Source::Flag),
        // extra build-time checks that a build is suitable for release
        ("published", Source::Flag),
    ];

    #[derive(Debug)]
    pub struct Cfgs {
        enabled: BTreeSet<&'static str>,
    }

    impl Cfgs {
        /**
        Create a build configuration and read the default variables.
        */
        pub fn new() -> Self {
            let enabled = KNOWN
                .iter()
                .filter(|(cfg, source)| source.is_enabled(cfg))
                .map(|(cfg, _)| *cfg)
                .collect();

            Cfgs { enabled }
        }

        pub fn is_enabled(&self, cfg: &str) -> bool {
            self.enabled.contains(cfg)
        }

        pub fn apply(self) {
            if self.is_enabled("published") {
                assert!(
                    !self.is_enabled("checked"),
                    "a build may be either checked or published, but not both"
                );
                assert!(
                    self.is_enabled("release"),
                    "published builds must be optimized"
                );
            }

            for (cfg, _) in KNOWN {
                println!("cargo:rustc-check-cfg=cfg({})", cfg);
            }

            for cfg in &self.enabled {
                println!("cargo:rustc-cfg={}", cfg);
            }

            println!("cargo:rerun-if-changed=build.rs");
        }
    }

    impl Source {
        fn is_enabled(&self, cfg: &str) -> bool {
            match self {
                Source::Cargo(key, value) => {
                    println!("cargo:rerun-if-env-changed={}", key);

                    env::var(key).map(|var| var == *value).unwrap_or(false)
                }
                Source::Flag => {
                    let key = format!("SQUIRRELBIND_{}", cfg.to_uppercase());
                    println!("cargo:rerun-if-env-changed={}", key);

                    env::var(key).map(|var| var != "0").unwrap_or(false)
                }
                Source::Nightly => version_check::is_feature_flaggable().unwrap_or(false),
            }
        }
    }
}
