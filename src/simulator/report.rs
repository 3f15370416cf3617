//! Simulation report generation.

use crate::constants::FRAME_MS;
use crate::runner::Difficulty;
use serde::Serialize;

/// Outcome of one simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub difficulty: Difficulty,
    pub score: u32,
    pub level: u32,
    pub frames: u64,
    pub lives_lost: u32,
    pub lives_gained: u32,
    pub timed_out: bool,
    /// Frame number of each level-up.
    pub level_up_frames: Vec<u64>,
}

impl RunStats {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            score: 0,
            level: 1,
            frames: 0,
            lives_lost: 0,
            lives_gained: 0,
            timed_out: false,
            level_up_frames: Vec::new(),
        }
    }
}

/// Aggregates for one difficulty.
#[derive(Debug, Clone, Serialize)]
pub struct DifficultySummary {
    pub difficulty: Difficulty,
    pub runs: u32,
    pub timed_out: u32,
    pub mean_score: f64,
    pub max_score: u32,
    pub mean_level: f64,
    pub max_level: u32,
    pub mean_frames: f64,
    pub mean_lives_gained: f64,
}

impl DifficultySummary {
    fn from_runs(difficulty: Difficulty, runs: &[&RunStats]) -> Self {
        let n = runs.len().max(1) as f64;
        Self {
            difficulty,
            runs: runs.len() as u32,
            timed_out: runs.iter().filter(|r| r.timed_out).count() as u32,
            mean_score: runs.iter().map(|r| r.score as f64).sum::<f64>() / n,
            max_score: runs.iter().map(|r| r.score).max().unwrap_or(0),
            mean_level: runs.iter().map(|r| r.level as f64).sum::<f64>() / n,
            max_level: runs.iter().map(|r| r.level).max().unwrap_or(1),
            mean_frames: runs.iter().map(|r| r.frames as f64).sum::<f64>() / n,
            mean_lives_gained: runs.iter().map(|r| r.lives_gained as f64).sum::<f64>() / n,
        }
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub summaries: Vec<DifficultySummary>,
    /// Individual run stats for detailed analysis
    pub runs: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(difficulties: &[Difficulty], runs: Vec<RunStats>) -> Self {
        let summaries = difficulties
            .iter()
            .map(|&d| {
                let matching: Vec<&RunStats> =
                    runs.iter().filter(|r| r.difficulty == d).collect();
                DifficultySummary::from_runs(d, &matching)
            })
            .collect();
        Self { summaries, runs }
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "{:<8} {:>6} {:>10} {:>6} {:>10} {:>6} {:>10} {:>8}\n",
            "Tier", "Runs", "Mean score", "Max", "Mean level", "Max", "Mean secs", "Timeout"
        ));
        for s in &self.summaries {
            report.push_str(&format!(
                "{:<8} {:>6} {:>10.1} {:>6} {:>10.2} {:>6} {:>10.1} {:>8}\n",
                s.difficulty.name(),
                s.runs,
                s.mean_score,
                s.max_score,
                s.mean_level,
                s.max_level,
                s.mean_frames * FRAME_MS as f64 / 1000.0,
                s.timed_out
            ));
        }
        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(difficulty: Difficulty, score: u32, level: u32) -> RunStats {
        RunStats {
            score,
            level,
            frames: 600,
            ..RunStats::new(difficulty)
        }
    }

    #[test]
    fn test_summaries_per_difficulty() {
        let report = SimReport::from_runs(
            &[Difficulty::Easy, Difficulty::Hard],
            vec![
                run(Difficulty::Easy, 10, 2),
                run(Difficulty::Easy, 20, 3),
                run(Difficulty::Hard, 4, 1),
            ],
        );
        assert_eq!(report.summaries.len(), 2);
        let easy = &report.summaries[0];
        assert_eq!(easy.runs, 2);
        assert_eq!(easy.mean_score, 15.0);
        assert_eq!(easy.max_score, 20);
        assert_eq!(easy.max_level, 3);
        assert_eq!(report.summaries[1].max_score, 4);
    }

    #[test]
    fn test_empty_difficulty_does_not_divide_by_zero() {
        let report = SimReport::from_runs(&[Difficulty::Normal], Vec::new());
        assert_eq!(report.summaries[0].runs, 0);
        assert_eq!(report.summaries[0].mean_score, 0.0);
    }

    #[test]
    fn test_text_and_json() {
        let report = SimReport::from_runs(&[Difficulty::Easy], vec![run(Difficulty::Easy, 5, 1)]);
        assert!(report.to_text().contains("Easy"));
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["summaries"][0]["difficulty"], "easy");
    }
}
