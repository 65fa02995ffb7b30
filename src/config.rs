//! Configuration management for Quizzy Server

use std::env;
use std::str::FromStr;

use crate::extraction::{OcrOptions, PipelineOptions, QualityThresholds};
use crate::ocr::{OcrEngineConfig, OcrEngineKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub extraction: ExtractionConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted upload body
    pub upload_max_bytes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Page cap when a request does not give one
    pub max_pages: usize,
    /// Upper bound on one extraction, enforced by the HTTP layer
    pub timeout_secs: u64,
    pub quality: QualityThresholds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    pub engine: OcrEngineKind,
    pub language: String,
    pub dpi: u32,
    pub workers: usize,
    pub tesseract_path: String,
    pub tessdata_dir: Option<String>,
}

/// A variable was set to a value that does not parse
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {name}: {value:?}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

impl Default for Config {
    fn default() -> Self {
        let pipeline = PipelineOptions::default();
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                upload_max_bytes: 50 * 1024 * 1024,
            },
            extraction: ExtractionConfig {
                max_pages: pipeline.max_pages,
                timeout_secs: 120,
                quality: pipeline.quality,
            },
            ocr: OcrConfig {
                engine: OcrEngineKind::Cli,
                language: pipeline.ocr.language,
                dpi: pipeline.ocr.dpi,
                workers: pipeline.ocr.workers,
                tesseract_path: "tesseract".to_string(),
                tessdata_dir: None,
            },
        }
    }
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    /// Unset variables take their defaults; set but unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let parse = |name: &'static str, fallback: String| -> String {
            lookup(name).unwrap_or(fallback)
        };

        let engine = match lookup("OCR_ENGINE") {
            Some(value) => OcrEngineKind::parse(&value).ok_or(ConfigError {
                name: "OCR_ENGINE",
                value,
            })?,
            None => defaults.ocr.engine,
        };

        Ok(Config {
            server: ServerConfig {
                host: parse("SERVER_HOST", defaults.server.host),
                port: number(&lookup, "SERVER_PORT", defaults.server.port)?,
                upload_max_bytes: number(
                    &lookup,
                    "UPLOAD_MAX_BYTES",
                    defaults.server.upload_max_bytes,
                )?,
            },
            extraction: ExtractionConfig {
                max_pages: number(&lookup, "EXTRACT_MAX_PAGES", defaults.extraction.max_pages)?,
                timeout_secs: number(
                    &lookup,
                    "EXTRACT_TIMEOUT_SECS",
                    defaults.extraction.timeout_secs,
                )?,
                quality: QualityThresholds {
                    min_chars: number(
                        &lookup,
                        "QUALITY_MIN_CHARS",
                        defaults.extraction.quality.min_chars,
                    )?,
                    min_alpha_ratio: ratio(
                        &lookup,
                        "QUALITY_MIN_ALPHA_RATIO",
                        defaults.extraction.quality.min_alpha_ratio,
                    )?,
                },
            },
            ocr: OcrConfig {
                engine,
                language: parse("OCR_LANG", defaults.ocr.language),
                dpi: number(&lookup, "OCR_DPI", defaults.ocr.dpi)?,
                workers: number(&lookup, "OCR_WORKERS", defaults.ocr.workers)?,
                tesseract_path: parse("TESSERACT_PATH", defaults.ocr.tesseract_path),
                tessdata_dir: lookup("TESSDATA_DIR").or(defaults.ocr.tessdata_dir),
            },
        })
    }

    /// Options for the extraction pipeline
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_pages: self.extraction.max_pages,
            quality: self.extraction.quality,
            ocr: OcrOptions {
                language: self.ocr.language.clone(),
                dpi: self.ocr.dpi,
                workers: self.ocr.workers,
            },
        }
    }

    /// Settings for the recognition engine
    pub fn engine_config(&self) -> OcrEngineConfig {
        OcrEngineConfig {
            kind: self.ocr.engine,
            tesseract_path: self.ocr.tesseract_path.clone(),
            tessdata_dir: self.ocr.tessdata_dir.clone(),
            dpi: self.ocr.dpi,
        }
    }
}

fn number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { name, value }),
        None => Ok(default),
    }
}

/// A fraction in `[0, 1]`; NaN and infinities are rejected
fn ratio<F>(lookup: &F, name: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = number(lookup, name, default)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError {
            name,
            value: lookup(name).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_match_extraction_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.extraction.max_pages, 30);
        assert_eq!(config.extraction.quality.min_chars, 100);
        assert_eq!(config.extraction.quality.min_alpha_ratio, 0.5);
        assert_eq!(config.ocr.language, "eng+kor");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.ocr.workers, 2);
        assert_eq!(config.pipeline_options(), PipelineOptions::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_PORT", "9001"),
            ("EXTRACT_MAX_PAGES", "5"),
            ("QUALITY_MIN_ALPHA_RATIO", "0.75"),
            ("OCR_LANG", "kor"),
            ("OCR_ENGINE", "lib"),
            ("TESSDATA_DIR", "/usr/share/tessdata"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.extraction.max_pages, 5);
        assert_eq!(config.extraction.quality.min_alpha_ratio, 0.75);
        assert_eq!(config.ocr.engine, OcrEngineKind::Lib);

        let options = config.pipeline_options();
        assert_eq!(options.max_pages, 5);
        assert_eq!(options.ocr.language, "kor");

        let engine = config.engine_config();
        assert_eq!(engine.tessdata_dir.as_deref(), Some("/usr/share/tessdata"));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = Config::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.name, "SERVER_PORT");

        let err = Config::from_lookup(lookup(&[("OCR_ENGINE", "gpt")])).unwrap_err();
        assert_eq!(err.name, "OCR_ENGINE");
    }

    #[test]
    fn test_alpha_ratio_must_be_a_fraction() {
        for bad in ["NaN", "inf", "-inf", "-0.1", "1.5"] {
            let err = Config::from_lookup(lookup(&[("QUALITY_MIN_ALPHA_RATIO", bad)]))
                .unwrap_err();
            assert_eq!(err.name, "QUALITY_MIN_ALPHA_RATIO", "{}", bad);
            assert_eq!(err.value, bad);
        }

        for good in ["0", "0.0", "1", "0.5"] {
            let config =
                Config::from_lookup(lookup(&[("QUALITY_MIN_ALPHA_RATIO", good)])).unwrap();
            assert!((0.0..=1.0).contains(&config.extraction.quality.min_alpha_ratio));
        }
    }
}
