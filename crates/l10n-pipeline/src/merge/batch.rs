use super::index::{IndexSource, TranslationIndex};
use super::{LineMerger, merge_translated_csv_into_txt};
use crate::config::PipelineConfig;
use crate::error::{MergeError, PipelineError};
use crate::files::{file_name_of, regular_files};
use std::path::PathBuf;

/// One raw script to merge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergeJob {
    pub file_name: String,
    pub raw_path: PathBuf,
    pub csv_path: PathBuf,
    pub target_path: PathBuf,
    pub source: IndexSource,
}

/// The scripts of a merge run, in file name order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MergePlan {
    pub jobs: Vec<MergeJob>,
    /// Scripts without an index entry.
    pub skipped: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergedScript {
    pub file_name: String,
    pub source: IndexSource,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergeFailure {
    pub file_name: String,
    pub target: PathBuf,
    pub message: String,
}

/// Outcome of [`merge_translation_files`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MergeReport {
    pub merged: Vec<MergedScript>,
    pub skipped: Vec<String>,
    pub failed: Vec<MergeFailure>,
}

impl MergeReport {
    /// Starts a report for `plan`, with its skipped scripts already counted.
    pub fn for_plan(plan: &MergePlan) -> Self {
        Self {
            skipped: plan.skipped.clone(),
            ..Self::default()
        }
    }

    /// Records the outcome of one job, logging failures.
    pub fn record(&mut self, job: &MergeJob, result: Result<(), MergeError>) {
        match result {
            Ok(()) => {
                tracing::debug!("Merged {} ({})", job.file_name, job.source);
                self.merged.push(MergedScript {
                    file_name: job.file_name.clone(),
                    source: job.source,
                });
            },
            Err(e) => {
                tracing::error!(
                    "Failed to merge {} into {}: {}",
                    job.file_name,
                    job.target_path.display(),
                    e
                );
                self.failed.push(MergeFailure {
                    file_name: job.file_name.clone(),
                    target: job.target_path.clone(),
                    message: e.to_string(),
                });
            },
        }
    }
}

fn is_script_candidate(file_name: &str) -> bool {
    file_name.ends_with(".txt") || file_name.starts_with("adv_")
}

/// Works out which raw scripts have a translation and where their merged
/// copies go.
///
/// The resource folder is created here; failing to create it is an error.
/// A missing raw folder is logged and yields an empty plan.
pub fn plan_merge(config: &PipelineConfig) -> Result<MergePlan, PipelineError> {
    let index = TranslationIndex::load(&config.pretranslation_dir, &config.translation_dir);
    tracing::info!("Loaded {} translation index entries", index.len());

    fs_err::create_dir_all(&config.resource_dir)?;

    let raw_files = match regular_files(&config.raw_dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("Skipping raw scripts: {}", e);
            return Ok(MergePlan::default());
        },
    };

    let mut plan = MergePlan::default();

    for raw_path in raw_files {
        let file_name = file_name_of(&raw_path);
        if !is_script_candidate(&file_name) {
            continue;
        }

        let Some(entry) = index.get(&file_name) else {
            tracing::debug!("No translation for {}", file_name);
            plan.skipped.push(file_name);
            continue;
        };

        plan.jobs.push(MergeJob {
            target_path: config.resource_dir.join(&file_name),
            csv_path: entry.path.clone(),
            source: entry.source,
            raw_path,
            file_name,
        });
    }

    Ok(plan)
}

/// Merges one script. The target is only written when the whole file merged.
pub fn run_merge_job(job: &MergeJob, merger: &dyn LineMerger) -> Result<(), MergeError> {
    let csv_text = fs_err::read_to_string(&job.csv_path)?;
    let raw_text = fs_err::read_to_string(&job.raw_path)?;

    let merged = merge_translated_csv_into_txt(&csv_text, &raw_text, merger)?;
    fs_err::write(&job.target_path, merged)?;
    Ok(())
}

/// Merges every translated raw script into the resource folder.
///
/// A script that fails to merge is logged and reported; the batch continues.
pub fn merge_translation_files(
    config: &PipelineConfig,
    merger: &dyn LineMerger,
) -> Result<MergeReport, PipelineError> {
    let plan = plan_merge(config)?;
    let mut report = MergeReport::for_plan(&plan);

    for job in &plan.jobs {
        report.record(job, run_merge_job(job, merger));
    }

    tracing::info!(
        "Merged {} script(s), {} failed, {} without translation",
        report.merged.len(),
        report.failed.len(),
        report.skipped.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::ReplaceMerger;
    use crate::merge::index::INDEX_FILE_NAME;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct Project {
        _temp_dir: TempDir,
        config: PipelineConfig,
    }

    fn project() -> Project {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().resolve_relative_to(temp_dir.path());

        fs::create_dir_all(&config.raw_dir).unwrap();
        fs::create_dir_all(&config.pretranslation_dir).unwrap();
        fs::create_dir_all(&config.translation_dir).unwrap();

        Project {
            _temp_dir: temp_dir,
            config,
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_adapted_translation_wins() {
        let Project { _temp_dir, config } = project();

        write(&config.raw_dir.join("adv_a.txt"), "[message text=朝]\n");
        write(
            &config.pretranslation_dir.join(INDEX_FILE_NAME),
            r#"{"adv_a.txt":"pre/a.csv"}"#,
        );
        write(&config.pretranslation_dir.join("pre/a.csv"), "text,trans\n朝,P\n");
        write(
            &config.translation_dir.join(INDEX_FILE_NAME),
            r#"{"adv_a.txt":"data/a.csv"}"#,
        );
        write(&config.translation_dir.join("data/a.csv"), "text,trans\n朝,A\n");

        let report = merge_translation_files(&config, &ReplaceMerger).unwrap();

        assert_eq!(
            report.merged,
            vec![MergedScript {
                file_name: "adv_a.txt".to_string(),
                source: IndexSource::Adapted,
            }]
        );
        assert_eq!(
            fs::read_to_string(config.resource_dir.join("adv_a.txt")).unwrap(),
            "[message text=A]\n"
        );
    }

    #[test]
    fn test_plan_filters_and_skips_untranslated() {
        let Project { _temp_dir, config } = project();

        write(&config.raw_dir.join("adv_a.txt"), "");
        write(&config.raw_dir.join("adv_noext"), "");
        write(&config.raw_dir.join("notes.md"), "");
        write(&config.raw_dir.join("b.txt"), "");
        write(
            &config.pretranslation_dir.join(INDEX_FILE_NAME),
            r#"{"adv_a.txt":"a.csv","adv_noext":"n.csv","notes.md":"x.csv"}"#,
        );

        let plan = plan_merge(&config).unwrap();
        let names: Vec<&str> = plan.jobs.iter().map(|job| job.file_name.as_str()).collect();

        assert_eq!(names, vec!["adv_a.txt", "adv_noext"]);
        assert_eq!(plan.skipped, vec!["b.txt"]);
        assert!(config.resource_dir.is_dir());
    }

    #[test]
    fn test_failed_merge_writes_nothing_and_continues() {
        let Project { _temp_dir, config } = project();

        write(&config.raw_dir.join("adv_bad.txt"), "[message text=朝]\n[message text=夜]\n");
        write(&config.raw_dir.join("adv_good.txt"), "[message text=朝]\n");
        write(
            &config.translation_dir.join(INDEX_FILE_NAME),
            r#"{"adv_bad.txt":"bad.csv","adv_good.txt":"good.csv","adv_gone.txt":"gone.csv"}"#,
        );
        write(&config.translation_dir.join("bad.csv"), "text,trans\n朝,Morning\n");
        write(&config.translation_dir.join("good.csv"), "text,trans\n朝,Morning\n");

        let report = merge_translation_files(&config, &ReplaceMerger).unwrap();

        assert_eq!(report.merged.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file_name, "adv_bad.txt");
        assert!(!config.resource_dir.join("adv_bad.txt").exists());
        assert!(config.resource_dir.join("adv_good.txt").exists());
    }

    #[test]
    fn test_stub_merger_is_used() {
        struct Marker;
        impl LineMerger for Marker {
            fn merge(&self, original: &str, translated: &str) -> Result<String, MergeError> {
                Ok(format!("{translated}|{original}"))
            }
        }

        let Project { _temp_dir, config } = project();
        write(&config.raw_dir.join("adv_a.txt"), "[narration text=雨]");
        write(
            &config.translation_dir.join(INDEX_FILE_NAME),
            r#"{"adv_a.txt":"a.csv"}"#,
        );
        write(&config.translation_dir.join("a.csv"), "text,trans\n雨,rain\n");

        merge_translation_files(&config, &Marker).unwrap();

        assert_eq!(
            fs::read_to_string(config.resource_dir.join("adv_a.txt")).unwrap(),
            "[narration text=rain|雨]"
        );
    }

    #[test]
    fn test_missing_raw_dir_is_an_empty_plan() {
        let Project { _temp_dir, config } = project();
        fs::remove_dir_all(&config.raw_dir).unwrap();

        let report = merge_translation_files(&config, &ReplaceMerger).unwrap();
        assert_eq!(report, MergeReport::default());
    }
}
