//! Calibration strategy tips, one per question in rotation.

use std::fmt;

/// A short calibration technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyTip {
    pub title: &'static str,
    pub body: &'static str,
}

impl fmt::Display for StrategyTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

pub const STRATEGY_TIPS: [StrategyTip; 8] = [
    StrategyTip {
        title: "Decomposition",
        body: "Break down complex problems into simpler, more manageable components to make the overall estimation process more accurate.",
    },
    StrategyTip {
        title: "Avoiding Anchoring",
        body: "Practice adjusting estimates as new information becomes available to prevent early data from disproportionately influencing your judgment.",
    },
    StrategyTip {
        title: "Equivalent Bets",
        body: "Frame probability assessments in terms of bets with equivalent outcomes to make it easier to gauge the likelihood of different events.",
    },
    StrategyTip {
        title: "Feedback and Record Keeping",
        body: "Compare your probability estimates against actual outcomes and keep detailed records to adjust and refine future assessments.",
    },
    StrategyTip {
        title: "Overconfidence Calibration",
        body: "Estimate probability ranges for your predictions to recognize and adjust for personal bias towards certainty.",
    },
    StrategyTip {
        title: "Scenario Analysis",
        body: "Develop and analyze a range of possible outcomes, including best-case, worst-case, and most likely scenarios.",
    },
    StrategyTip {
        title: "Seeking Disconfirming Evidence",
        body: "Look for information that contradicts your current beliefs to mitigate confirmation bias.",
    },
    StrategyTip {
        title: "Diverse Viewpoints",
        body: "Incorporate perspectives from a variety of sources to improve the accuracy of your probability estimates.",
    },
];

/// Tip shown alongside the question at `index`.
pub fn tip_for(index: usize) -> &'static StrategyTip {
    &STRATEGY_TIPS[index % STRATEGY_TIPS.len()]
}
