use std::sync::{Arc, Mutex};

use log::info;
use rust_bert::bart::{
    BartConfigResources, BartMergesResources, BartModelResources, BartVocabResources,
};
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::ner::NERModel;
use rust_bert::pipelines::summarization::{SummarizationConfig, SummarizationModel};
use rust_bert::pipelines::token_classification::{
    LabelAggregationOption, TokenClassificationConfig,
};
use rust_bert::resources::RemoteResource;
use rust_bert::roberta::{RobertaConfigResources, RobertaModelResources, RobertaVocabResources};
use tch::Device;

use crate::capability::{EntityRecognizer, RecognizedEntity, SummaryRequest, Summarizer};
use crate::config::{Settings, SummaryParams};
use crate::error::{InferenceError, ModelLoadError};

/// The two inference capabilities, constructed once at startup and shared read-only.
#[derive(Clone)]
pub struct ModelSet {
    pub summarizer: Arc<dyn Summarizer>,
    pub recognizer: Arc<dyn EntityRecognizer>,
}

impl ModelSet {
    pub fn new(summarizer: Arc<dyn Summarizer>, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            summarizer,
            recognizer,
        }
    }

    /// Downloads (on first use) and loads DistilBART CNN for summarization and
    /// XLM-RoBERTa for entity recognition.
    ///
    /// Loading blocks for a long time, so it runs on the blocking pool.
    pub async fn load(settings: &Settings) -> Result<Self, ModelLoadError> {
        let params = settings.summary;
        let device = settings.device.to_device();

        let set = tokio::task::spawn_blocking(move || -> Result<ModelSet, ModelLoadError> {
            info!("Loading summarization model (distilbart-cnn-12-6) on {device:?}...");
            let summarizer = BertSummarizer::load(params, device)?;
            info!("Loading entity recognition model (xlm-roberta-large-ner) on {device:?}...");
            let recognizer = BertEntityRecognizer::load(device)?;
            info!("Models loaded.");
            Ok(ModelSet::new(Arc::new(summarizer), Arc::new(recognizer)))
        })
        .await??;

        Ok(set)
    }

    /// A set whose capabilities refuse every call, for runs that only extract text.
    pub fn unloaded() -> Self {
        Self::new(Arc::new(NotLoaded), Arc::new(NotLoaded))
    }
}

struct NotLoaded;

impl Summarizer for NotLoaded {
    fn summarize(&self, _request: &SummaryRequest) -> Result<String, InferenceError> {
        Err(InferenceError::Backend("models were not loaded".into()))
    }
}

impl EntityRecognizer for NotLoaded {
    fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>, InferenceError> {
        Err(InferenceError::Backend("models were not loaded".into()))
    }
}

pub struct BertSummarizer {
    model: Mutex<SummarizationModel>,
    params: SummaryParams,
}

impl BertSummarizer {
    /// rust-bert fixes generation bounds when the model is built, so they are
    /// baked in here and every request must match them.
    pub fn load(params: SummaryParams, device: Device) -> Result<Self, ModelLoadError> {
        let mut config = SummarizationConfig::new(
            ModelType::Bart,
            ModelResource::Torch(Box::new(RemoteResource::from_pretrained(
                BartModelResources::DISTILBART_CNN_12_6,
            ))),
            RemoteResource::from_pretrained(BartConfigResources::DISTILBART_CNN_12_6),
            RemoteResource::from_pretrained(BartVocabResources::DISTILBART_CNN_12_6),
            Some(RemoteResource::from_pretrained(
                BartMergesResources::DISTILBART_CNN_12_6,
            )),
        );
        config.min_length = params.min_length;
        config.max_length = Some(params.max_length);
        config.do_sample = params.do_sample;
        config.device = device;

        let model = SummarizationModel::new(config).map_err(ModelLoadError::Summarizer)?;
        Ok(Self {
            model: Mutex::new(model),
            params,
        })
    }
}

impl Summarizer for BertSummarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<String, InferenceError> {
        if request.params() != self.params {
            return Err(InferenceError::UnsupportedParameters {
                requested: format!("{:?}", request.params()),
                loaded: format!("{:?}", self.params),
            });
        }

        let model = self.model.lock().map_err(|_| InferenceError::Poisoned)?;
        let output = model.summarize(&[request.text.as_str()])?;

        output
            .into_iter()
            .next()
            .map(|summary| summary.trim().to_string())
            .filter(|summary| !summary.is_empty())
            .ok_or(InferenceError::EmptyOutput)
    }
}

pub struct BertEntityRecognizer {
    model: Mutex<NERModel>,
}

impl BertEntityRecognizer {
    pub fn load(device: Device) -> Result<Self, ModelLoadError> {
        let mut config = TokenClassificationConfig::new(
            ModelType::XLMRoberta,
            ModelResource::Torch(Box::new(RemoteResource::from_pretrained(
                RobertaModelResources::XLM_ROBERTA_NER_ES,
            ))),
            RemoteResource::from_pretrained(RobertaConfigResources::XLM_ROBERTA_NER_ES),
            RemoteResource::from_pretrained(RobertaVocabResources::XLM_ROBERTA_NER_ES),
            None::<RemoteResource>,
            false,
            None::<bool>,
            None::<bool>,
            LabelAggregationOption::Mode,
        );
        config.device = device;

        let model = NERModel::new(config).map_err(ModelLoadError::Recognizer)?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl EntityRecognizer for BertEntityRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, InferenceError> {
        let model = self.model.lock().map_err(|_| InferenceError::Poisoned)?;

        // Full entities merge B-/I- sub-token runs into a single span.
        let entities = model
            .predict_full_entities(&[text])
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(entities
            .into_iter()
            .map(|entity| RecognizedEntity {
                label: strip_iob_prefix(&entity.label).to_string(),
                word: entity.word,
                score: entity.score,
            })
            .collect())
    }
}

fn strip_iob_prefix(label: &str) -> &str {
    label
        .strip_prefix("B-")
        .or_else(|| label.strip_prefix("I-"))
        .unwrap_or(label)
}
