use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

/// Completion card: percentage, correct/possible counts, pass/fail verdict
/// and the current streak.
pub struct SummaryCard<'a> {
    result: &'a SessionResult,
    streak_days: u32,
    theme: &'a Theme,
}

impl<'a> SummaryCard<'a> {
    pub fn new(result: &'a SessionResult, streak_days: u32, theme: &'a Theme) -> Self {
        Self {
            result,
            streak_days,
            theme,
        }
    }
}

impl Widget for SummaryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Training complete ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let verdict_style = if self.result.passed {
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.warning())
        };
        let verdict = if self.result.passed {
            "Great result! Words moved to \"learned\"."
        } else {
            "You need 90% or more to mark words as learned."
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{}%", self.result.success_percentage),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Correct answers: {} of {}",
                    self.result.actual_correct, self.result.total_possible
                ),
                Style::default().fg(colors.card_fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(verdict, verdict_style)),
        ];

        if self.result.passed && self.streak_days > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Daily streak: {} day(s)", self.streak_days),
                Style::default().fg(colors.selection()),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
