use crate::catalog::Catalog;
use crate::models::*;
use crate::priority::Priority;
use crate::tally::{ModuleTally, Tally};

pub const CHART_LABEL_MAX_CHARS: usize = 30;
const CHART_LABEL_ELLIPSIS: &str = "...";

struct PriorityStyle {
    label: &'static str,
    color: &'static str,
    fill: &'static str,
    border: &'static str,
}

const fn style(priority: Priority) -> PriorityStyle {
    match priority {
        Priority::One => PriorityStyle {
            label: "Priority 1 (Important)",
            color: "#dc2626",
            fill: "rgba(220, 38, 127, 0.8)",
            border: "rgba(220, 38, 127, 1)",
        },
        Priority::Two => PriorityStyle {
            label: "Priority 2 (Medium)",
            color: "#2563eb",
            fill: "rgba(59, 130, 246, 0.8)",
            border: "rgba(59, 130, 246, 1)",
        },
        Priority::Three => PriorityStyle {
            label: "Priority 3 (Discovery)",
            color: "#16a34a",
            fill: "rgba(16, 185, 129, 0.8)",
            border: "rgba(16, 185, 129, 1)",
        },
    }
}

/// Abbreviated module title for chart axes. Counts characters, not bytes.
pub fn chart_label(title: &str) -> String {
    match title.char_indices().nth(CHART_LABEL_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &title[..cut], CHART_LABEL_ELLIPSIS),
        None => title.to_string(),
    }
}

pub fn summary(tally: &Tally) -> ResultsSummary {
    ResultsSummary {
        total_votes: tally.total_votes(),
        participant_count: tally.participant_count(),
        modules_voted_count: tally.modules_voted(),
        total_modules_in_catalog: tally.module_count(),
    }
}

fn chart_row(t: &ModuleTally) -> ChartRow {
    ChartRow {
        module: chart_label(&t.module.title),
        priority_1: t.counts.get(Priority::One),
        priority_2: t.counts.get(Priority::Two),
        priority_3: t.counts.get(Priority::Three),
        total: t.counts.total(),
    }
}

fn detailed_row(t: &ModuleTally) -> DetailedRow {
    DetailedRow {
        module: t.module.title.clone(),
        duration: t.module.duration.clone(),
        priority_1: t.counts.get(Priority::One),
        priority_2: t.counts.get(Priority::Two),
        priority_3: t.counts.get(Priority::Three),
        total: t.counts.total(),
    }
}

pub fn chart_rows(tally: &Tally) -> Vec<ChartRow> {
    tally.ranked().into_iter().map(chart_row).collect()
}

pub fn detailed_rows(tally: &Tally) -> Vec<DetailedRow> {
    tally.ranked().into_iter().map(detailed_row).collect()
}

/// One slice per priority, or nothing at all when no vote was counted.
pub fn pie_slices(tally: &Tally) -> Vec<PieSlice> {
    if tally.total_votes() == 0 {
        return Vec::new();
    }
    let totals = tally.totals();
    Priority::ALL
        .iter()
        .map(|&p| {
            let s = style(p);
            PieSlice {
                name: s.label.to_string(),
                value: totals.get(p),
                color: s.color.to_string(),
            }
        })
        .collect()
}

pub fn chart_series(tally: &Tally) -> ChartSeries {
    let ranked = tally.ranked();
    let labels = ranked.iter().map(|t| chart_label(&t.module.title)).collect();
    let datasets = Priority::ALL
        .iter()
        .map(|&p| {
            let s = style(p);
            ChartDataset {
                label: s.label.to_string(),
                data: ranked.iter().map(|t| t.counts.get(p)).collect(),
                background_color: s.fill.to_string(),
                border_color: s.border.to_string(),
                border_width: 1,
            }
        })
        .collect();
    ChartSeries { labels, datasets }
}

pub fn participant_details(submissions: &[(String, VoteSubmission)]) -> Vec<ParticipantDetail> {
    submissions
        .iter()
        .map(|(participant, submission)| ParticipantDetail {
            participant: participant.clone(),
            vote_count: submission.total_votes(),
            timestamp: submission.timestamp,
        })
        .collect()
}

pub fn build_results(catalog: &Catalog, submissions: &[(String, VoteSubmission)]) -> VoteResults {
    let tally = Tally::aggregate(catalog, submissions.iter().map(|(_, s)| s));
    VoteResults {
        summary: summary(&tally),
        chart_data: chart_rows(&tally),
        pie_data: pie_slices(&tally),
        detailed_data: detailed_rows(&tally),
        participant_details: participant_details(submissions),
    }
}

pub fn build_chart_series(catalog: &Catalog, submissions: &[(String, VoteSubmission)]) -> ChartSeries {
    let tally = Tally::aggregate(catalog, submissions.iter().map(|(_, s)| s));
    chart_series(&tally)
}
