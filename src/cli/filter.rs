//! Filter command implementation.
//!
//! Single input (stdin or one file) goes to stdout or `--output`. With
//! `--in-place`, every path is filtered in parallel and rewritten only when
//! the output differs.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{borrow::Cow, fs, path::Path};

use super::common::{is_stdio, plural_count, read_input, write_output};
use crate::cli::args::FilterArgs;
use crate::filter::{FilterOptions, MedialFilter};
use crate::render::EmbedRenderer;
use crate::{debug, log};

/// Execute filter command
pub fn run_filter<R>(args: &FilterArgs, filter: &MedialFilter<R>) -> Result<()>
where
    R: EmbedRenderer + Sync,
{
    let options = options(args);
    if !filter.applies(&options) {
        debug!("filter"; "format gate closed, input passes through unchanged");
    }

    if args.in_place {
        return filter_in_place(&args.paths, filter, &options);
    }

    let input = match args.paths.as_slice() {
        [] => None,
        [path] => Some(path.as_path()),
        _ => bail!("multiple paths require --in-place"),
    };

    let text = read_input(input)?;
    let output = filter.filter(&text, &options);
    write_output(args.output.as_deref(), &output)?;

    if let Some(path) = &args.output {
        log!("filter"; "wrote output to {}", path.display());
    }
    Ok(())
}

fn options(args: &FilterArgs) -> FilterOptions {
    if args.unformatted {
        FilterOptions::default()
    } else {
        FilterOptions::with_format(args.format.as_str())
    }
}

/// Filter every path in place.
fn filter_in_place<R>(
    paths: &[std::path::PathBuf],
    filter: &MedialFilter<R>,
    options: &FilterOptions,
) -> Result<()>
where
    R: EmbedRenderer + Sync,
{
    if paths.is_empty() || paths.iter().any(|p| is_stdio(p)) {
        bail!("--in-place needs file paths");
    }

    let changed = paths
        .par_iter()
        .map(|path| filter_file(path, filter, options))
        .collect::<Result<Vec<bool>>>()?
        .into_iter()
        .filter(|&changed| changed)
        .count();

    log!(
        "filter";
        "rewrote {} of {}",
        plural_count(changed, "file"),
        paths.len()
    );
    Ok(())
}

/// Filter one file in place. Returns whether it was rewritten.
fn filter_file<R: EmbedRenderer>(
    path: &Path,
    filter: &MedialFilter<R>,
    options: &FilterOptions,
) -> Result<bool> {
    let text = read_input(Some(path))?;
    match filter.filter(&text, options) {
        Cow::Owned(output) if output != text => {
            fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))?;
            debug!("filter"; "rewrote {}", path.display());
            Ok(true)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OverrideArgs;
    use crate::config::test_parse_config;
    use std::path::PathBuf;
    use std::sync::Arc;

    const CONFIG: &str = "[site]\nroot = \"https://lms.example.edu\"\n";
    const PAGE: &str = "<p><a href=\"https://lms.example.edu/mod/helixmedia/launch.php?type=1&amp;l=5\">Clip</a></p>";

    fn medial() -> MedialFilter {
        MedialFilter::from_config(Arc::new(test_parse_config(CONFIG)))
    }

    fn args(paths: Vec<PathBuf>) -> FilterArgs {
        FilterArgs {
            paths,
            format: "1".into(),
            unformatted: false,
            in_place: false,
            output: None,
            overrides: OverrideArgs::default(),
        }
    }

    #[test]
    fn test_filter_file_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        let output = dir.path().join("out.html");
        fs::write(&input, PAGE).unwrap();

        let mut args = args(vec![input.clone()]);
        args.output = Some(output.clone());
        run_filter(&args, &medial()).unwrap();

        let result = fs::read_to_string(&output).unwrap();
        assert!(result.starts_with("<p><iframe "));
        assert!(result.contains("id=\"hmlvid-5\""));
        assert_eq!(fs::read_to_string(&input).unwrap(), PAGE);
    }

    #[test]
    fn test_unformatted_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        let output = dir.path().join("out.html");
        fs::write(&input, PAGE).unwrap();

        let mut args = args(vec![input]);
        args.unformatted = true;
        args.output = Some(output.clone());
        run_filter(&args, &medial()).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), PAGE);
    }

    #[test]
    fn test_in_place_rewrites_only_changed_files() {
        let dir = tempfile::tempdir().unwrap();
        let with_link = dir.path().join("a.html");
        let plain = dir.path().join("b.html");
        fs::write(&with_link, PAGE).unwrap();
        fs::write(&plain, "<p>nothing here</p>").unwrap();

        let mut args = args(vec![with_link.clone(), plain.clone()]);
        args.in_place = true;
        run_filter(&args, &medial()).unwrap();

        assert!(fs::read_to_string(&with_link).unwrap().contains("<iframe "));
        assert_eq!(fs::read_to_string(&plain).unwrap(), "<p>nothing here</p>");
    }

    #[test]
    fn test_multiple_paths_require_in_place() {
        let args = args(vec!["a.html".into(), "b.html".into()]);
        let err = run_filter(&args, &medial()).unwrap_err();
        assert!(err.to_string().contains("--in-place"));
    }

    #[test]
    fn test_in_place_rejects_stdin() {
        let mut args = args(vec!["-".into()]);
        args.in_place = true;
        assert!(run_filter(&args, &medial()).is_err());
    }
}
