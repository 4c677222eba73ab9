pub mod charting;
pub mod mosaic;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Chart, Clear, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthChar;
use webbrowser::Browser;

use crate::{
    app::{App, Feedback},
    hint::masked_answer,
    scoring::{
        max_possible_score, pixel_size_for_guess, points_for_guess, score_percent, ScoreRating,
    },
    session::{LevelResult, LevelSummary, FINAL_GUESS_SECS, MAX_GUESSES, TOTAL_LEVELS},
    ui::{mosaic::Mosaic, screen::current_screen},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const POPUP_WIDTH: u16 = 52;
const TIMER_WARNING_SECS: u32 = 10;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        current_screen(&self.state).render(self, area, buf);
    }
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

pub(crate) fn render_start(app: &App, area: Rect, buf: &mut Buffer) {
    let title_style = bold_style().fg(Color::Magenta);

    let mut lines = vec![
        Line::from(Span::styled("HyperPix", title_style)),
        Line::default(),
        Line::from("Guess what is hiding behind the pixels."),
        Line::from(format!(
            "{TOTAL_LEVELS} levels, {MAX_GUESSES} guesses each. The picture sharpens after every miss."
        )),
        Line::default(),
        Line::from(Span::styled("Scoring", bold_style())),
    ];
    lines.extend((1..=MAX_GUESSES).map(|guess| {
        Line::from(format!(
            "guess {guess}: {} pts",
            points_for_guess(guess)
        ))
    }));
    lines.push(Line::from(Span::styled(
        format!("the last guess runs on a {FINAL_GUESS_SECS} second clock"),
        italic_style(),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!(
            "catalog: {} | order: {} | hints: {}",
            app.config.catalog,
            app.config.selection,
            on_off(app.config.hints)
        ),
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(enter) start / (esc) quit",
        italic_style(),
    )));

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

pub(crate) fn render_play(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.game.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // picture
            Constraint::Length(1), // hint
            Constraint::Length(3), // guess box
            Constraint::Length(1), // feedback
            Constraint::Length(1), // previous guesses
            Constraint::Length(1), // legend
        ])
        .split(area);

    let mut header = vec![
        Span::styled(
            format!("Level {}/{}", state.current_level, TOTAL_LEVELS),
            bold_style(),
        ),
        Span::raw("   "),
        Span::styled(format!("Score {}", state.score), bold_style().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(
            format!("Guess {}/{}", state.current_guess.min(MAX_GUESSES), MAX_GUESSES),
            bold_style(),
        ),
    ];
    if state.show_timer {
        let timer_style = if state.time_remaining <= TIMER_WARNING_SECS {
            bold_style().fg(Color::Red)
        } else {
            bold_style().fg(Color::Yellow)
        };
        header.push(Span::raw("   "));
        header.push(Span::styled(format!("{}s", state.time_remaining), timer_style));
    }
    Paragraph::new(Line::from(header))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let frame = Block::bordered().border_type(BorderType::Rounded);
    let picture_area = frame.inner(chunks[1]);
    frame.render(chunks[1], buf);
    if let Some(image) = &state.current_image {
        let unblurred = state
            .pending_level_summary
            .as_ref()
            .is_some_and(|summary| summary.show_unblurred);
        let mosaic = if unblurred {
            Mosaic::unblurred(image.id)
        } else {
            Mosaic::new(image.id, pixel_size_for_guess(state.current_guess))
        };
        mosaic.render(picture_area, buf);
    }

    let hint_line = match &state.current_image {
        Some(image) if state.hint_used => Line::from(vec![
            Span::styled("Hint: ", bold_style()),
            Span::styled(
                spaced(&masked_answer(&image.answer, &state.revealed_letter_positions)),
                bold_style().fg(Color::Yellow),
            ),
        ]),
        Some(_) if app.config.hints => {
            Line::from(Span::styled("(tab) reveal a few letters", dim_style()))
        }
        _ => Line::default(),
    };
    Paragraph::new(hint_line)
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    // leave room for the borders and the cursor
    let input_width = chunks[3].width.saturating_sub(3) as usize;
    Paragraph::new(Span::styled(
        format!("{}_", visible_tail(&app.input, input_width)),
        bold_style(),
    ))
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Your guess "),
    )
    .render(chunks[3], buf);

    let feedback = match app.feedback {
        Some(Feedback::Correct { points }) => Span::styled(
            format!("Correct! +{points} points"),
            bold_style().fg(Color::Green),
        ),
        Some(Feedback::TryAgain) if state.guesses_left() == 1 => Span::styled(
            "Last guess! The clock is running",
            bold_style().fg(Color::Red),
        ),
        Some(Feedback::TryAgain) => Span::styled(
            format!("Not quite. {} guesses left", state.guesses_left()),
            bold_style().fg(Color::Red),
        ),
        Some(Feedback::OutOfGuesses) => {
            Span::styled("Out of guesses", bold_style().fg(Color::Red))
        }
        None => Span::raw(""),
    };
    Paragraph::new(feedback)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    if !state.guess_history.is_empty() {
        Paragraph::new(Span::styled(
            format!("Tried: {}", state.guess_history.join(" · ")),
            dim_style(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
    }

    let legend = if app.config.hints {
        "(enter) guess / (tab) hint / (esc) menu"
    } else {
        "(enter) guess / (esc) menu"
    };
    Paragraph::new(Span::styled(legend, italic_style())).render(chunks[6], buf);
}

/// Popup shown over the play screen once a level is solved or failed
pub(crate) fn render_level_summary(summary: &LevelSummary, area: Rect, buf: &mut Buffer) {
    let result = summary.result;
    let (title, title_style) = if result.correct {
        (" Level Complete! ", bold_style().fg(Color::Green))
    } else {
        (" Level Failed ", bold_style().fg(Color::Red))
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("The answer was: "),
            Span::styled(summary.answer.clone(), bold_style()),
        ]),
        if result.correct {
            Line::from(format!(
                "Solved on guess {}: +{} points",
                result.guess_number, result.points_earned
            ))
        } else {
            Line::from("No points this time")
        },
    ];
    if !summary.guesses.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Your guesses: {}", summary.guesses.join(", ")),
            dim_style(),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        if summary.is_final_level {
            "(enter) see results"
        } else {
            "(enter) next level"
        },
        italic_style(),
    )));

    let width = POPUP_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let text_rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(inner_width).max(1))
        .sum();
    let height = (text_rows as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(popup, buf);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Double)
                .title(Span::styled(title, title_style))
                .title_alignment(Alignment::Center),
        )
        .render(popup, buf);
}

pub(crate) fn render_end(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.game.state();
    let rating = ScoreRating::from_score(state.score);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // rating
            Constraint::Length(1), // score
            Constraint::Length(1), // correct / failed
            Constraint::Min(4),    // chart
            Constraint::Length(2), // breakdown
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        rating.to_string(),
        bold_style().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{}/{} points ({}%)",
            state.score,
            max_possible_score(),
            score_percent(state.score)
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} correct", state.correct_count()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} failed", state.failed_count()),
            Style::default().fg(Color::Red),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    if chunks[3].height >= 3 && chunks[3].width >= 10 {
        render_score_chart(&state.level_results, chunks[3], buf);
    }

    let breakdown: Vec<Span> = state
        .level_results
        .iter()
        .flat_map(|result| {
            let entry = if result.correct {
                Span::styled(
                    format!("L{} +{}", result.level, result.points_earned),
                    Style::default().fg(Color::Green),
                )
            } else {
                Span::styled(format!("L{} ✗", result.level), Style::default().fg(Color::Red))
            };
            [entry, Span::raw("  ")]
        })
        .collect();
    Paragraph::new(Line::from(breakdown))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);

    let legend = Paragraph::new(Span::styled(
        String::from(if Browser::is_available() {
            "(r)estart / (t)weet / (esc)ape"
        } else {
            "(r)estart / (esc)ape"
        }),
        italic_style(),
    ));
    legend.render(chunks[6], buf);
}

fn render_score_chart(results: &[LevelResult], area: Rect, buf: &mut Buffer) {
    let coords = charting::score_coords(results);
    let (last_level, highest_score) = charting::compute_chart_params(&coords);
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&coords)];
    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("level")
                .bounds([1.0, last_level])
                .labels(vec![
                    Span::styled("1", bold_style()),
                    Span::styled(charting::format_label(last_level), bold_style()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("score")
                .bounds([0.0, highest_score])
                .labels(vec![
                    Span::styled("0", bold_style()),
                    Span::styled(charting::format_label(highest_score), bold_style()),
                ]),
        )
        .render(area, buf);
}

/// Space out a masked answer so each blank reads as one letter
fn spaced(masked: &str) -> String {
    masked
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tail of `input` that fits in `max_width` columns
fn visible_tail(input: &str, max_width: usize) -> &str {
    let mut start = input.len();
    let mut width = 0;
    for (idx, ch) in input.char_indices().rev() {
        width += ch.width().unwrap_or(0);
        if width > max_width {
            break;
        }
        start = idx;
    }
    &input[start..]
}
