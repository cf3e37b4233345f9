//! Self-documenting example configuration written by `--gentemplate`.

use super::{GenerationOptions, ToolDeclaration};

/// Commented YAML form of [`template_options`].
pub const TEMPLATE_YAML: &str = r#"# gotools-binstubs configuration.
#
# Generate binstubs with: gotools-binstubs --input <this file>

# Package declared in the generated aggregator file. Required when
# emitAggregatorFile is true.
aggregatorPackageName: tools

# Write the aggregator file (default true) and where to put it.
emitAggregatorFile: true
aggregatorFilePath: tools.go

# Directory the binstubs are written to, created if missing.
binstubsDirectoryPath: bin

# Tags ANDed together into a //go:build line in the aggregator file.
buildConstraintTags:
  - tools

# Flags placed right after `go run` in every binstub.
globalRunModifiers:
  - -mod=mod

tools:
  # Unpinned tools are imported by the aggregator file so the module
  # file tracks their version. The binstub name defaults to the last
  # path segment of packageReference.
  - packageReference: golang.org/x/tools/cmd/stringer

  # Pinned tools are run at their version and never imported.
  # binstubModifiers are appended after the package reference.
  - packageReference: github.com/golangci/golangci-lint/cmd/golangci-lint
    version: v1.55.2
    binstubName: lint
    binstubModifiers:
      - run

  # overrideGlobalRunModifiers replaces globalRunModifiers with
  # toolRunModifiers instead of appending to them.
  - packageReference: github.com/sqlc-dev/sqlc/cmd/sqlc
    toolRunModifiers:
      - -tags=sqlite
    overrideGlobalRunModifiers: true

  # Kept in the aggregator file but no binstub is written.
  - packageReference: github.com/golang/mock/mockgen
    generateBinstub: false
"#;

/// The options described by [`TEMPLATE_YAML`].
pub fn template_options() -> GenerationOptions {
    let mut sqlc = ToolDeclaration::new("github.com/sqlc-dev/sqlc/cmd/sqlc")
        .with_run_modifiers(vec!["-tags=sqlite".to_string()]);
    sqlc.override_global_run_modifiers = true;

    let mut lint = ToolDeclaration::new("github.com/golangci/golangci-lint/cmd/golangci-lint")
        .with_version("v1.55.2")
        .with_binstub_name("lint");
    lint.binstub_modifiers = vec!["run".to_string()];

    let mut mockgen = ToolDeclaration::new("github.com/golang/mock/mockgen");
    mockgen.generate_binstub = Some(false);

    GenerationOptions {
        aggregator_package_name: Some("tools".to_string()),
        tools: vec![
            ToolDeclaration::new("golang.org/x/tools/cmd/stringer"),
            lint,
            sqlc,
            mockgen,
        ],
        global_run_modifiers: vec!["-mod=mod".to_string()],
        build_constraint_tags: vec!["tools".to_string()],
        ..Default::default()
    }
}
