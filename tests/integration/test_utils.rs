//! Shared test utilities for integration tests
//!
//! Scripted content generators, a fixture scorer, and go-to-market payloads
//! whose rubric scores are known.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::time::Duration;
use tourney::scoring::{CompositeScore, Scorer};
use tourney::tournament::{ContentGenerator, GenerationOptions};
use tourney::TourneyError;

/// What the generator does for one temperature.
#[derive(Clone)]
pub enum Reply {
    /// Respond immediately with this raw text.
    Text(String),
    /// Respond with this raw text after a delay.
    Delayed(String, u64),
    /// Fail like a transport error.
    Error(String),
    /// Never respond within any sane timeout.
    Hang,
    /// Panic inside the generator.
    Panic,
}

impl Reply {
    /// `{"score": N}`, read back by [`FixtureScorer`].
    pub fn scored(score: u8) -> Self {
        Reply::Text(scored_payload(score).to_string())
    }

    pub fn scored_after(score: u8, delay_ms: u64) -> Self {
        Reply::Delayed(scored_payload(score).to_string(), delay_ms)
    }
}

/// Generator scripted per temperature. Records every call it receives.
pub struct ScriptedGenerator {
    replies: Vec<(f32, Reply)>,
    calls: Mutex<Vec<GenerationOptions>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<(f32, Reply)>) -> Self {
        Self {
            replies,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Temperatures the generator was called with, in call order.
    pub fn called_temperatures(&self) -> Vec<f32> {
        self.calls.lock().iter().map(|o| o.temperature).collect()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, TourneyError> {
        self.calls.lock().push(options);
        let reply = self
            .replies
            .iter()
            .find(|(t, _)| (*t - options.temperature).abs() < f32::EPSILON)
            .map(|(_, reply)| reply.clone())
            .ok_or_else(|| {
                TourneyError::ProviderError(format!(
                    "no scripted reply for temperature {}",
                    options.temperature
                ))
            })?;
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Delayed(text, delay_ms) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(text)
            }
            Reply::Error(message) => Err(TourneyError::ProviderRequestFailed(message)),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
                Ok("{}".to_string())
            }
            Reply::Panic => panic!("scripted generator panic"),
        }
    }
}

pub fn scored_payload(score: u8) -> Value {
    json!({ "score": score })
}

/// Scores a payload by its `score` field, spread over the four dimensions.
pub struct FixtureScorer;

impl Scorer for FixtureScorer {
    fn score(&self, content: &Value, _context: &Value) -> CompositeScore {
        let total = content["score"].as_u64().unwrap_or(0).min(100) as u8;
        let mut dims = [0u8; 4];
        let mut left = total;
        for dim in dims.iter_mut() {
            *dim = left.min(25);
            left -= *dim;
        }
        CompositeScore::from_dimensions(dims[0], dims[1], dims[2], dims[3])
    }
}

/// Venture brief used as alignment context.
pub fn venture_brief() -> Value {
    json!({
        "description": "An AI-powered analytics platform for growing software companies",
        "problemStatement": "Fragmented data pipelines slow down engineering teams",
        "valueProp": "Unified analytics without pipeline maintenance",
        "targetMarket": "Software companies scaling engineering teams"
    })
}

fn channel(name: &str, budget: u64, cac: u64, kpi: &str, kind: &str, tier: &str) -> Value {
    json!({
        "name": name,
        "monthly_budget": budget,
        "expected_cac": cac,
        "primary_kpi": kpi,
        "channelType": kind,
        "primaryTier": tier
    })
}

/// A concrete plan for the venture brief. Scores 25 / 24 / 20 / 25 = 94.
pub fn rich_plan() -> Value {
    json!({
        "tiers": [
            {
                "name": "Enterprise",
                "description": "Large software companies with dedicated data teams",
                "tam": 10_000_000, "sam": 1_000_000, "som": 100_000,
                "persona": "CTO at Fortune 500",
                "painPoints": ["Complex data pipelines", "Vendor lock-in"]
            },
            {
                "name": "Mid-Market",
                "description": "Growing software companies after Series B",
                "tam": 5_000_000, "sam": 500_000, "som": 50_000,
                "persona": "VP Engineering at Series B+",
                "painPoints": ["Scaling engineering teams without data chaos"]
            },
            {
                "name": "SMB",
                "description": "Small software businesses without ops staff",
                "tam": 2_000_000, "sam": 200_000, "som": 20_000,
                "persona": "Technical founder",
                "painPoints": ["Limited budget", "No dedicated ops team"]
            }
        ],
        "channels": [
            channel("Organic Search", 5000, 100, "Organic traffic", "organic", "SMB"),
            channel("Paid Search", 10000, 150, "Conversions", "paid", "Mid-Market"),
            channel("Social Media", 3000, 80, "Engagement", "organic", "SMB"),
            channel("Content Marketing", 4000, 90, "Leads", "owned", "Enterprise"),
            channel("Email Marketing", 2000, 50, "Open rate", "owned", "Mid-Market"),
            channel("Partnerships", 0, 120, "Referrals", "earned", "Enterprise"),
            channel("Events", 8000, 200, "Attendees", "paid", "Enterprise"),
            channel("Direct Sales", 12000, 250, "Deals closed", "paid", "Enterprise")
        ],
        "launch_timeline": [
            {"milestone": "Private beta with design partners", "date": "2026-06-01", "owner": "Founder"},
            {"milestone": "Public launch on Product Hunt", "date": "2026-09-01", "owner": "Marketing"},
            {"milestone": "Enterprise pilot program", "date": "2027-01-01", "owner": "Growth Team"}
        ]
    })
}

/// What a normalizer emits when the model returned almost nothing.
/// Scores 2 / 5 / 0 / 0 = 7.
pub fn padded_plan() -> Value {
    let tiers: Vec<Value> = (1..=3)
        .map(|i| {
            json!({
                "name": format!("Tier {i}"),
                "description": "",
                "tam": 0, "sam": 0, "som": 0,
                "persona": null,
                "painPoints": []
            })
        })
        .collect();
    let channels: Vec<Value> = (1..=8)
        .map(|i| channel(&format!("Channel {i}"), 0, 0, "", "organic", "Tier 1"))
        .collect();
    json!({
        "tiers": tiers,
        "channels": channels,
        "launch_timeline": [
            {"milestone": "Soft launch", "date": "2026-03-01", "owner": "TBD"},
            {"milestone": "Public launch", "date": "2026-05-01", "owner": "TBD"},
            {"milestone": "Growth phase", "date": "2026-07-01", "owner": "TBD"}
        ]
    })
}

/// Wrap a payload the way chat models often answer.
pub fn fenced(payload: &Value) -> String {
    format!("Here is the plan:\n```json\n{}\n```", payload)
}
