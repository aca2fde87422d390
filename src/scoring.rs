//! Aggregate results over a finished (or partial) answer sheet.

use std::fmt;

use crate::models::QuestionBank;
use crate::session::Answers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct_count: usize,
    pub total_count: usize,
    /// 0 to 100, rounded half up.
    pub percentage: u8,
}

impl Score {
    pub fn tier(&self) -> Tier {
        Tier::for_percentage(self.percentage)
    }
}

/// Qualitative band used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl Tier {
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => Tier::Excellent,
            60..=79 => Tier::Good,
            40..=59 => Tier::Fair,
            _ => Tier::NeedsPractice,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Fair => "fair",
            Tier::NeedsPractice => "needs practice",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent!",
            Tier::Good => "Good job!",
            Tier::Fair => "Not bad!",
            Tier::NeedsPractice => "Keep practicing!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn score(bank: &QuestionBank, answers: &Answers) -> Score {
    let total_count = bank.len();
    let correct_count = answers.values().filter(|record| record.is_correct).count();

    Score {
        correct_count,
        total_count,
        percentage: calculate_percentage(correct_count, total_count),
    }
}

fn calculate_percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * correct + total) / (2 * total);
    rounded.min(100) as u8
}
