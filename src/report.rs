use crate::entropy::{Base, Entropy};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Human,
    Json,
}

/// Which values to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub shannon: bool,
    pub metric: bool,
}

impl Metrics {
    pub fn any(&self) -> bool {
        self.shannon || self.metric
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub source: String,
    pub len: usize,
    pub base: Base,
    /// log_base(distinct byte values), the ceiling for `shannon`.
    pub max_entropy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shannon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
}

impl Report {
    pub fn measure(source: impl Into<String>, entropy: &Entropy, metrics: Metrics) -> Result<Self> {
        let max_entropy = entropy.max_entropy()?;
        let shannon = if metrics.shannon { Some(entropy.shannon()?) } else { None };
        let metric = if metrics.metric { Some(entropy.metric()?) } else { None };
        Ok(Report {
            source: source.into(),
            len: entropy.len(),
            base: entropy.base(),
            max_entropy,
            shannon,
            metric,
        })
    }

    /// One bare value per line, shannon first.
    pub fn to_human(&self) -> String {
        [self.shannon, self.metric]
            .iter()
            .flatten()
            .map(|v| format!("{}\n", float_repr(*v)))
            .collect()
    }
}

/// Outcome for one file of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub path: String,
    #[serde(flatten)]
    pub report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_human(&self) -> String {
        match (&self.report, &self.error) {
            (_, Some(e)) => format!("{}: error: {}", self.path, e),
            (Some(r), None) => {
                let mut parts = vec![self.path.clone()];
                if let Some(h) = r.shannon {
                    parts.push(format!("shannon={}", float_repr(h)));
                }
                if let Some(m) = r.metric {
                    parts.push(format!("metric={}", float_repr(m)));
                }
                parts.join(" ")
            }
            (None, None) => self.path.clone(),
        }
    }
}

/// Shortest round-trip text for `v`, shaped like Python's float repr:
/// positional for exponents in -4..16 (always with a fractional part),
/// scientific otherwise with a signed exponent of at least two digits.
pub fn float_repr(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if v < 0.0 { "-" } else { "" };

    if (-4..16).contains(&exp) {
        if exp < 0 {
            let zeros = "0".repeat((-exp - 1) as usize);
            format!("{sign}0.{zeros}{digits}")
        } else {
            let point = exp as usize + 1;
            if digits.len() <= point {
                let zeros = "0".repeat(point - digits.len());
                format!("{sign}{digits}{zeros}.0")
            } else {
                format!("{sign}{}.{}", &digits[..point], &digits[point..])
            }
        }
    } else {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exp.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: Metrics = Metrics { shannon: true, metric: true };

    #[test]
    fn human_prints_shannon_then_metric() {
        let e = Entropy::with_bytes(b"aabb", Base::BITS);
        let r = Report::measure("<text>", &e, BOTH).unwrap();
        assert_eq!(r.to_human(), "1.0\n0.25\n");
    }

    #[test]
    fn only_requested_values() {
        let e = Entropy::with_bytes(b"aaaa", Base::BITS);
        let r = Report::measure("<text>", &e, Metrics { shannon: false, metric: true }).unwrap();
        assert_eq!(r.shannon, None);
        assert_eq!(r.to_human(), "0.0\n");
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("shannon").is_none());
        assert_eq!(json["len"], 4);
        assert_eq!(json["base"], 2.0);
        assert_eq!(json["max_entropy"], 0.0);
    }

    #[test]
    fn max_entropy_in_report() {
        let e = Entropy::with_bytes(b"abcd", Base::BITS);
        let r = Report::measure("<text>", &e, BOTH).unwrap();
        assert_eq!(r.max_entropy, 2.0);
        assert!(r.shannon.unwrap() <= r.max_entropy);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["max_entropy"], 2.0);
    }

    #[test]
    fn empty_buffer_propagates() {
        let e = Entropy::default();
        assert!(Report::measure("<text>", &e, BOTH).is_err());
    }

    #[test]
    fn metrics_any() {
        assert!(BOTH.any());
        assert!(Metrics { shannon: false, metric: true }.any());
        assert!(!Metrics { shannon: false, metric: false }.any());
    }

    #[test]
    fn batch_entry_lines() {
        let e = Entropy::with_bytes(b"ab", Base::BITS);
        let report = Report::measure("a.txt", &e, BOTH).unwrap();
        let ok = BatchEntry { path: "a.txt".into(), report: Some(report), error: None };
        assert_eq!(ok.to_human(), "a.txt shannon=1.0 metric=0.5");
        let bad = BatchEntry { path: "b.txt".into(), report: None, error: Some("boom".into()) };
        assert!(bad.is_err());
        assert_eq!(bad.to_human(), "b.txt: error: boom");
    }

    #[test]
    fn float_repr_positional() {
        assert_eq!(float_repr(1.0), "1.0");
        assert_eq!(float_repr(0.0), "0.0");
        assert_eq!(float_repr(0.25), "0.25");
        assert_eq!(float_repr(100.0), "100.0");
        assert_eq!(float_repr(123.456), "123.456");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(-2.5), "-2.5");
    }

    #[test]
    fn float_repr_scientific() {
        assert_eq!(float_repr(3.99999988922464e-5), "3.99999988922464e-05");
        assert_eq!(float_repr(0.00005), "5e-05");
        assert_eq!(float_repr(1.5e-7), "1.5e-07");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(2.5e-100), "2.5e-100");
    }
}
