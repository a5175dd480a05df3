//! Analyze command implementation.

use super::open_store;
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use hazmix_engine::{AnalysisRequest, AnalysisResult, EngineConfig, ReactivityEngine};
use hazmix_store::{CachedStore, SqliteStore};
use std::fs;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let request = build_request(&args)?;
    let store = open_store(&config.database_path()?)?;

    let result = run_analysis(store, &config.engine, request).await?;

    println!("{}", formatter.format_analysis(&result)?);
    Ok(())
}

/// Merge the request file, if any, with the command-line arguments.
pub fn build_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    let mut request = match &args.request {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        }
        None => AnalysisRequest::default(),
    };

    request.chemical_ids.extend(args.chemicals.iter().copied());
    request.explicit_group_ids.extend(args.groups.iter().copied());
    request.include_water |= args.water;

    Ok(request)
}

/// Run one analysis against an opened store.
pub async fn run_analysis(
    store: SqliteStore,
    config: &EngineConfig,
    request: AnalysisRequest,
) -> Result<AnalysisResult> {
    let result = if config.cache_lookups {
        ReactivityEngine::new(CachedStore::new(store), config.clone())
            .analyze(request)
            .await?
    } else {
        ReactivityEngine::new(store, config.clone())
            .analyze(request)
            .await?
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::error::CliError;
    use hazmix_domain::{Assessment, ChemicalId, GroupId};

    fn args(chemicals: &[i64]) -> AnalyzeArgs {
        AnalyzeArgs {
            chemicals: chemicals.iter().copied().map(ChemicalId::new).collect(),
            groups: vec![],
            water: false,
            request: None,
        }
    }

    #[test]
    fn test_build_request_from_args() {
        let mut args = args(&[8, 10]);
        args.groups = vec![GroupId::new(21)];
        args.water = true;

        let request = build_request(&args).unwrap();
        assert_eq!(request, AnalysisRequest::new([8, 10]).with_groups([21]).with_water());
    }

    #[test]
    fn test_build_request_merges_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"chemicalIds": [40], "includeWater": true}"#).unwrap();

        let mut args = args(&[8]);
        args.request = Some(path);

        let request = build_request(&args).unwrap();
        assert_eq!(request.chemical_ids, vec![ChemicalId::new(40), ChemicalId::new(8)]);
        assert!(request.include_water);
    }

    #[test]
    fn test_build_request_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, "chemicalIds = [1]").unwrap();

        let mut args = args(&[]);
        args.request = Some(path);
        assert!(matches!(build_request(&args), Err(CliError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_run_analysis_with_and_without_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::reference_db(&dir);

        let mut config = EngineConfig::lenient();
        let request = AnalysisRequest::new([40]).with_water();

        let cached = run_analysis(open_store(&path).unwrap(), &config, request.clone())
            .await
            .unwrap();
        config.cache_lookups = false;
        let plain = run_analysis(open_store(&path).unwrap(), &config, request).await.unwrap();

        assert_eq!(cached, plain);
        assert_eq!(cached.summary.overall_assessment, Assessment::Dangerous);
    }

    #[tokio::test]
    async fn test_run_analysis_unknown_chemical() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixtures::reference_db(&dir);

        let err = run_analysis(
            open_store(&path).unwrap(),
            &EngineConfig::lenient(),
            AnalysisRequest::new([8, 999]),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_CHEMICAL");
    }
}
