// ABOUTME: Runs the pipeline stages for the command line and prints human-readable summaries
// ABOUTME: Summaries go to the given writers so stdout stays separate from diagnostics

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokenweave_core::{
    FanOut, OverrideDifferencer, OverrideReport, ProjectLayout, RandomIds, RemapReport, Remapper,
    RestructureReport, Restructurer,
};
use tokenweave_types::PipelineConfig;

/// Loaded configuration bound to a project root
pub struct Project {
    pub config: PipelineConfig,
    pub layout: ProjectLayout,
}

impl Project {
    pub fn new(root: &Path, config: PipelineConfig) -> Self {
        let layout = ProjectLayout::new(root, config.paths.clone());
        Self { config, layout }
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(self.layout.root()).unwrap_or(path)
    }
}

pub fn restructure(project: &Project, out: &mut dyn Write) -> Result<RestructureReport> {
    let report = Restructurer::new(&project.config, &project.layout)
        .run(&mut RandomIds)
        .context("Token restructure failed")?;

    let output_dir = project.layout.root().join(&project.config.paths.output_dir);
    writeln!(out, "Conversion complete. Files written to {}/:", project.config.paths.output_dir)?;
    for path in &report.written {
        let shown = path.strip_prefix(&output_dir).unwrap_or(path);
        writeln!(out, "  {}", shown.display())?;
    }

    writeln!(out)?;
    writeln!(out, "Color mapping applied:")?;
    for theme in &project.config.themes {
        for binding in theme.bindings_with(&project.config.shared_families) {
            writeln!(out, "  {}: {} -> {}", theme.name, binding.source, binding.name)?;
        }
    }
    let visited = &project.config.link_visited;
    writeln!(out, "  {}.{} -> link.visited", visited.family, visited.shade)?;
    Ok(report)
}

pub fn overrides(
    project: &Project,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<OverrideReport> {
    let report = OverrideDifferencer::new(&project.config, &project.layout)
        .run()
        .context("Override computation failed")?;

    for missing in &report.missing {
        writeln!(err, "MISSING: {} {} {}", missing.theme, missing.family, missing.source)?;
    }

    writeln!(out, "Config written to {}", project.relative(&report.path).display())?;
    for theme in &report.themes {
        writeln!(out)?;
        writeln!(out, "{} overrides:", theme.theme)?;
        for (family, count) in &theme.counts {
            writeln!(out, "  {family}: {count} tokens")?;
        }
    }
    Ok(report)
}

pub fn remap(
    project: &Project,
    inputs: &[PathBuf],
    per_file: bool,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<RemapReport> {
    let remapper =
        Remapper::new(&project.config.css, &project.layout).context("Invalid CSS configuration")?;

    let inputs = if inputs.is_empty() {
        vec![remapper.default_input()]
    } else {
        inputs
            .iter()
            .map(|input| project.layout.root().join(input))
            .collect()
    };
    let fan_out = if per_file {
        FanOut::PerFile
    } else {
        let output = output
            .map(|path| project.layout.root().join(path))
            .unwrap_or_else(|| remapper.default_output());
        FanOut::Aggregate { output }
    };

    let report = remapper
        .run(&inputs, &fan_out)
        .context("CSS variable remap failed")?;
    for written in &report.outputs {
        writeln!(
            out,
            "Wrote {} ({} variables)",
            project.relative(&written.path).display(),
            written.variables
        )?;
    }
    Ok(report)
}
