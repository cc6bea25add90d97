use std::collections::HashMap;
use std::sync::Arc;

use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;

use super::utils::ModelFiles;

fn read_config(files: &ModelFiles) -> Result<(Config, String)> {
    let raw = std::fs::read_to_string(&files.config)?;
    let config: Config = serde_json::from_str(&raw)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
    Ok((config, raw))
}

fn var_builder(files: &ModelFiles, device: &Device) -> Result<VarBuilder<'static>> {
    // SAFETY: the weights file is opened read-only and not modified while mapped.
    unsafe { VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], DType::F32, device) }
}

/// Loads the transformer body, whichever prefix the checkpoint was saved under.
fn load_backbone(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb.clone(), config)
    }
}

/// Bare BERT encoder returning per-token hidden states (sentence-transformers layout).
#[derive(Clone)]
pub struct BertEncoderModel {
    bert: Arc<BertModel>,
    hidden_size: usize,
}

impl BertEncoderModel {
    pub fn load(files: &ModelFiles, device: &Device) -> Result<Self> {
        let (config, _) = read_config(files)?;
        let vb = var_builder(files, device)?;
        let bert = load_backbone(&vb, &config)?;

        Ok(Self {
            bert: Arc::new(bert),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// `[batch, seq]` ids to `[batch, seq, hidden]` states.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.bert.forward(input_ids, token_type_ids, attention_mask)
    }
}

#[derive(Deserialize)]
struct LabelMap {
    id2label: HashMap<String, String>,
}

struct BertForTokenClassificationImpl {
    bert: BertModel,
    classifier: Linear,
}

/// BERT with a per-token classification head (e.g. part-of-speech tagging).
#[derive(Clone)]
pub struct BertTokenClassifier {
    inner: Arc<BertForTokenClassificationImpl>,
    labels: Arc<[String]>,
}

impl BertTokenClassifier {
    pub fn load(files: &ModelFiles, device: &Device) -> Result<Self> {
        let (config, raw) = read_config(files)?;
        let labels = parse_labels(&raw)?;

        let vb = var_builder(files, device)?;
        let bert = load_backbone(&vb, &config)?;
        let classifier = candle_nn::linear(config.hidden_size, labels.len(), vb.pp("classifier"))?;

        Ok(Self {
            inner: Arc::new(BertForTokenClassificationImpl { bert, classifier }),
            labels: labels.into(),
        })
    }

    /// Label names indexed by class id.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `[batch, seq]` ids to `[batch, seq, num_labels]` logits.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let hidden = self
            .inner
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        self.inner.classifier.forward(&hidden)
    }
}

/// Orders `id2label` by class id; ids must be dense from zero.
fn parse_labels(raw_config: &str) -> Result<Vec<String>> {
    let map: LabelMap = serde_json::from_str(raw_config)
        .map_err(|e| candle::Error::Msg(format!("config.json has no usable id2label: {}", e)))?;

    let mut labels = vec![None; map.id2label.len()];
    for (id, label) in map.id2label {
        let idx: usize = id
            .parse()
            .map_err(|_| candle::Error::Msg(format!("non-numeric label id '{}'", id)))?;
        let slot = labels
            .get_mut(idx)
            .ok_or_else(|| candle::Error::Msg(format!("label id {} out of range", idx)))?;
        *slot = Some(label);
    }

    labels
        .into_iter()
        .enumerate()
        .map(|(idx, label)| {
            label.ok_or_else(|| candle::Error::Msg(format!("label id {} missing", idx)))
        })
        .collect()
}
