//! Catalog records: clients, products and copywriters.
//!
//! Each record has a `New*` shape (create body, every required field present)
//! and a `*Patch` shape (update body, every field optional).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::FieldError;

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
}

fn require_patch(errors: &mut Vec<FieldError>, field: &str, value: &Option<String>) {
    if let Some(v) = value {
        require(errors, field, v);
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────
// Clients
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub company: String,
    pub email: String,
    pub industry: String,
    pub target_audience: String,
    pub brand_voice: String,
    pub communication_style: String,
    pub key_values: String,
    pub pain_points: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClient {
    pub name: String,
    pub company: String,
    pub email: String,
    pub industry: String,
    pub target_audience: String,
    pub brand_voice: String,
    pub communication_style: String,
    pub key_values: String,
    pub pain_points: String,
    pub notes: Option<String>,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "company", &self.company);
        require(&mut errors, "email", &self.email);
        require(&mut errors, "industry", &self.industry);
        require(&mut errors, "targetAudience", &self.target_audience);
        require(&mut errors, "brandVoice", &self.brand_voice);
        require(&mut errors, "communicationStyle", &self.communication_style);
        require(&mut errors, "keyValues", &self.key_values);
        require(&mut errors, "painPoints", &self.pain_points);
        finish(errors)
    }

    pub(crate) fn into_record(self, id: u64) -> Client {
        Client {
            id,
            name: self.name,
            company: self.company,
            email: self.email,
            industry: self.industry,
            target_audience: self.target_audience,
            brand_voice: self.brand_voice,
            communication_style: self.communication_style,
            key_values: self.key_values,
            pain_points: self.pain_points,
            notes: self.notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub industry: Option<String>,
    pub target_audience: Option<String>,
    pub brand_voice: Option<String>,
    pub communication_style: Option<String>,
    pub key_values: Option<String>,
    pub pain_points: Option<String>,
    pub notes: Option<String>,
}

impl ClientPatch {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_patch(&mut errors, "name", &self.name);
        require_patch(&mut errors, "company", &self.company);
        require_patch(&mut errors, "email", &self.email);
        require_patch(&mut errors, "industry", &self.industry);
        require_patch(&mut errors, "targetAudience", &self.target_audience);
        require_patch(&mut errors, "brandVoice", &self.brand_voice);
        require_patch(&mut errors, "communicationStyle", &self.communication_style);
        require_patch(&mut errors, "keyValues", &self.key_values);
        require_patch(&mut errors, "painPoints", &self.pain_points);
        finish(errors)
    }

    pub(crate) fn apply(self, client: &mut Client) {
        if let Some(v) = self.name {
            client.name = v;
        }
        if let Some(v) = self.company {
            client.company = v;
        }
        if let Some(v) = self.email {
            client.email = v;
        }
        if let Some(v) = self.industry {
            client.industry = v;
        }
        if let Some(v) = self.target_audience {
            client.target_audience = v;
        }
        if let Some(v) = self.brand_voice {
            client.brand_voice = v;
        }
        if let Some(v) = self.communication_style {
            client.communication_style = v;
        }
        if let Some(v) = self.key_values {
            client.key_values = v;
        }
        if let Some(v) = self.pain_points {
            client.pain_points = v;
        }
        if self.notes.is_some() {
            client.notes = self.notes;
        }
    }
}

// ─────────────────────────────────────────────
// Products
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub client_id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub benefits: String,
    pub features: String,
    pub target_market: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_advantage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    pub client_id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Option<String>,
    pub benefits: String,
    pub features: String,
    pub target_market: String,
    pub competitor_advantage: Option<String>,
    pub product_url: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.client_id == 0 {
            errors.push(FieldError::new("clientId", "clientId is required"));
        }
        require(&mut errors, "name", &self.name);
        require(&mut errors, "description", &self.description);
        require(&mut errors, "category", &self.category);
        require(&mut errors, "benefits", &self.benefits);
        require(&mut errors, "features", &self.features);
        require(&mut errors, "targetMarket", &self.target_market);
        finish(errors)
    }

    pub(crate) fn into_record(self, id: u64) -> Product {
        Product {
            id,
            client_id: self.client_id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            benefits: self.benefits,
            features: self.features,
            target_market: self.target_market,
            competitor_advantage: self.competitor_advantage,
            product_url: self.product_url,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub client_id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub benefits: Option<String>,
    pub features: Option<String>,
    pub target_market: Option<String>,
    pub competitor_advantage: Option<String>,
    pub product_url: Option<String>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.client_id == Some(0) {
            errors.push(FieldError::new("clientId", "clientId is required"));
        }
        require_patch(&mut errors, "name", &self.name);
        require_patch(&mut errors, "description", &self.description);
        require_patch(&mut errors, "category", &self.category);
        require_patch(&mut errors, "benefits", &self.benefits);
        require_patch(&mut errors, "features", &self.features);
        require_patch(&mut errors, "targetMarket", &self.target_market);
        finish(errors)
    }

    pub(crate) fn apply(self, product: &mut Product) {
        if let Some(v) = self.client_id {
            product.client_id = v;
        }
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.category {
            product.category = v;
        }
        if self.price.is_some() {
            product.price = self.price;
        }
        if let Some(v) = self.benefits {
            product.benefits = v;
        }
        if let Some(v) = self.features {
            product.features = v;
        }
        if let Some(v) = self.target_market {
            product.target_market = v;
        }
        if self.competitor_advantage.is_some() {
            product.competitor_advantage = self.competitor_advantage;
        }
        if self.product_url.is_some() {
            product.product_url = self.product_url;
        }
    }
}

// ─────────────────────────────────────────────
// Copywriters
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Copywriter {
    pub id: u64,
    pub name: String,
    pub style: String,
    pub description: String,
    pub techniques: String,
    pub best_for: String,
    pub tone: String,
    pub approach: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCopywriter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub techniques: String,
    #[serde(default)]
    pub best_for: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub approach: String,
    #[serde(default)]
    pub examples: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewCopywriter {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        require(&mut errors, "style", &self.style);
        require(&mut errors, "description", &self.description);
        require(&mut errors, "techniques", &self.techniques);
        require(&mut errors, "bestFor", &self.best_for);
        require(&mut errors, "tone", &self.tone);
        require(&mut errors, "approach", &self.approach);
        finish(errors)
    }

    pub(crate) fn into_record(self, id: u64) -> Copywriter {
        Copywriter {
            id,
            name: self.name,
            style: self.style,
            description: self.description,
            techniques: self.techniques,
            best_for: self.best_for,
            tone: self.tone,
            approach: self.approach,
            examples: self.examples,
            is_active: self.is_active,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopywriterPatch {
    pub name: Option<String>,
    pub style: Option<String>,
    pub description: Option<String>,
    pub techniques: Option<String>,
    pub best_for: Option<String>,
    pub tone: Option<String>,
    pub approach: Option<String>,
    pub examples: Option<String>,
    pub is_active: Option<bool>,
}

impl CopywriterPatch {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_patch(&mut errors, "name", &self.name);
        require_patch(&mut errors, "style", &self.style);
        require_patch(&mut errors, "description", &self.description);
        require_patch(&mut errors, "techniques", &self.techniques);
        require_patch(&mut errors, "bestFor", &self.best_for);
        require_patch(&mut errors, "tone", &self.tone);
        require_patch(&mut errors, "approach", &self.approach);
        finish(errors)
    }

    pub(crate) fn apply(self, copywriter: &mut Copywriter) {
        if let Some(v) = self.name {
            copywriter.name = v;
        }
        if let Some(v) = self.style {
            copywriter.style = v;
        }
        if let Some(v) = self.description {
            copywriter.description = v;
        }
        if let Some(v) = self.techniques {
            copywriter.techniques = v;
        }
        if let Some(v) = self.best_for {
            copywriter.best_for = v;
        }
        if let Some(v) = self.tone {
            copywriter.tone = v;
        }
        if let Some(v) = self.approach {
            copywriter.approach = v;
        }
        if self.examples.is_some() {
            copywriter.examples = self.examples;
        }
        if let Some(v) = self.is_active {
            copywriter.is_active = v;
        }
    }
}
