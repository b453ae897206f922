//! Letter grades and threshold helpers

use serde::{Deserialize, Serialize};

/// Indicator / health grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Points used when combining indicator grades into a health score
    pub fn points(self) -> f64 {
        match self {
            Grade::A => 100.0,
            Grade::B => 80.0,
            Grade::C => 60.0,
            Grade::D => 40.0,
            Grade::F => 20.0,
        }
    }

    pub fn is_strength(self) -> bool {
        matches!(self, Grade::A | Grade::B)
    }

    /// Grade a rate of change against a symmetric threshold (`>t` A, `>0` B, `>-t` C, else D)
    pub fn from_change(change: f64, threshold: f64) -> Grade {
        if change > threshold {
            Grade::A
        } else if change > 0.0 {
            Grade::B
        } else if change > -threshold {
            Grade::C
        } else {
            Grade::D
        }
    }
}

/// Location score grade (A+ … D)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
}

impl ScoreGrade {
    pub fn from_score(score: f64) -> ScoreGrade {
        match score {
            s if s >= 90.0 => ScoreGrade::APlus,
            s if s >= 80.0 => ScoreGrade::A,
            s if s >= 70.0 => ScoreGrade::BPlus,
            s if s >= 60.0 => ScoreGrade::B,
            s if s >= 50.0 => ScoreGrade::CPlus,
            s if s >= 40.0 => ScoreGrade::C,
            _ => ScoreGrade::D,
        }
    }
}

/// Coarse risk bucket used by location scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Higher scores mean lower risk
    pub fn from_score(score: f64) -> RiskBand {
        if score >= 80.0 {
            RiskBand::Low
        } else if score >= 60.0 {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }
}
