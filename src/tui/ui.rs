use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{self, Canvas, Circle};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap,
};

use crate::locale::Locale;
use crate::output::format_score;
use crate::scoring::{
    answer_label, interpretation_for, item, level_of, Level, ScoreReport, Subscale, ITEMS,
    MAX_ANSWER,
};
use crate::tui::app::{App, FlashKind, InputMode, Tab};
use crate::tui::theme::ThemeColors;

/// Lines taken by one questionnaire item: text, caption, slider, spacer
const ITEM_HEIGHT: usize = 4;
const RADAR_RADIUS: f64 = 6.0;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title bar
        Constraint::Length(1),  // Tab bar
        Constraint::Fill(1),    // Tab content
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_tab {
        Tab::Questionnaire => render_questionnaire(frame, chunks[2], app),
        Tab::Results => render_results(frame, chunks[2], app),
        Tab::About => render_about(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::ConfirmReset => render_reset_popup(frame, &app.theme),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let locale = app.config.locale;
    let title = locale.pick("Work Engagement Check", "ワークエンゲージメント診断");
    let subtitle = locale.pick(
        "UWES-9 (Utrecht Work Engagement Scale)",
        "UWES-9（ユトレヒト・ワーク・エンゲイジメント尺度）",
    );

    let line = Line::from(vec![
        Span::styled(title, Style::default().fg(app.theme.title_color).bold()),
        Span::raw("  "),
        Span::styled(subtitle, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let locale = app.config.locale;
    let titles = vec![
        locale.pick("1 Questionnaire", "1 診断"),
        locale.pick("2 Results", "2 結果"),
        locale.pick("3 About", "3 UWESについて"),
    ];

    let tabs = Tabs::new(titles)
        .select(app.current_tab.index())
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn slider_spans(answer: Option<u8>, theme: &ThemeColors) -> Vec<Span<'static>> {
    (0..=MAX_ANSWER)
        .map(|value| {
            if answer == Some(value) {
                Span::styled(
                    format!(" {} ", value),
                    Style::default().fg(theme.slider_filled).bold().reversed(),
                )
            } else {
                Span::styled(format!(" {} ", value), Style::default().fg(theme.slider_empty))
            }
        })
        .collect()
}

fn render_questionnaire(frame: &mut Frame, area: Rect, app: &App) {
    let locale = app.config.locale;
    let theme = &app.theme;

    let chunks = Layout::vertical([
        Constraint::Length(2),  // Instructions
        Constraint::Fill(1),    // Items
    ])
    .split(area);

    let instructions = Paragraph::new(locale.pick(
        "How often do you feel this way about your work? Answer all nine items, then press Enter.",
        "以下の9つの質問について、仕事に関してそのように感じる頻度を選択し、Enterで結果を表示します。",
    ))
    .style(Style::default().fg(theme.muted))
    .wrap(Wrap { trim: true });
    frame.render_widget(instructions, chunks[0]);

    let mut lines: Vec<Line> = Vec::with_capacity(ITEMS.len() * ITEM_HEIGHT);
    for (idx, item) in ITEMS.iter().enumerate() {
        let selected = idx == app.selected_item;
        let answer = app.session.answer(item.id);

        let marker = if selected { "▶ " } else { "  " };
        let text_style = if selected {
            Style::default().fg(theme.text).bold()
        } else {
            Style::default().fg(theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.title_color)),
            Span::styled(format!("Q{}. ", item.id), Style::default().fg(theme.title_color).bold()),
            Span::styled(item.text(locale), text_style),
        ]));

        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(item.subscale.name(locale), Style::default().fg(theme.muted).italic()),
        ]));

        let mut slider = vec![Span::raw("    ")];
        slider.extend(slider_spans(answer, theme));
        slider.push(Span::raw("  "));
        match answer.and_then(|value| answer_label(value, locale)) {
            Some(label) => slider.push(Span::styled(label, Style::default().fg(theme.muted))),
            None => slider.push(Span::styled(
                locale.pick("-  not answered", "-  未回答"),
                Style::default().fg(theme.unanswered),
            )),
        }
        lines.push(Line::from(slider));
        lines.push(Line::from(""));
    }

    // Keep the selected item visible
    let visible = chunks[1].height as usize;
    let bottom = (app.selected_item + 1) * ITEM_HEIGHT;
    let scroll = bottom.saturating_sub(visible) as u16;

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[1]);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let locale = app.config.locale;
    let theme = &app.theme;

    let Some(submission) = app.session.submission() else {
        let hint = Paragraph::new(locale.pick(
            "Answer the questions on the Questionnaire tab to see your results here.",
            "「診断」タブで質問に回答してから、こちらで結果を確認できます。",
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.muted))
        .wrap(Wrap { trim: true });
        frame.render_widget(hint, area);
        return;
    };
    let report = &submission.report;

    let chunks = Layout::vertical([
        Constraint::Length(1),   // Timestamp
        Constraint::Length(5),   // Score cards
        Constraint::Length(13),  // Charts
        Constraint::Length(5),   // Interpretation
        Constraint::Min(3),      // Answer details
    ])
    .split(area);

    let timestamp = format!(
        "{} {}",
        locale.pick("Assessed:", "診断日時:"),
        submission.submitted_at.format("%Y-%m-%d %H:%M")
    );
    frame.render_widget(
        Paragraph::new(timestamp).style(Style::default().fg(theme.muted)),
        chunks[0],
    );

    render_score_cards(frame, chunks[1], report, locale, theme);

    let chart_chunks = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_radar_chart(frame, chart_chunks[0], report, locale, theme);
    render_bar_chart(frame, chart_chunks[1], report, locale, theme);

    let level = report.overall_level();
    let interpretation = Paragraph::new(interpretation_for(level, locale))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(theme.accent))
                .title(Span::styled(
                    locale.pick(" Interpretation ", " 結果の解釈 "),
                    theme.title_style,
                )),
        );
    frame.render_widget(interpretation, chunks[3]);

    render_answer_table(frame, chunks[4], app);
}

fn render_score_cards(
    frame: &mut Frame,
    area: Rect,
    report: &ScoreReport,
    locale: Locale,
    theme: &ThemeColors,
) {
    let cards = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let level = report.overall_level();
    let color = theme.level_color(level);
    let overall = Paragraph::new(vec![
        Line::from(Span::styled(format_score(report.overall), Style::default().fg(color).bold())),
        Line::from(Span::styled(level.label(locale), Style::default().fg(color))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .border_style(Style::default().fg(color))
            .title(locale.pick(" Overall Score ", " 総合スコア ")),
    );
    frame.render_widget(overall, cards[0]);

    let subscale_lines: Vec<Line> = Subscale::ALL
        .iter()
        .map(|subscale| {
            let score = report.subscale(*subscale);
            let level = level_of(score);
            Line::from(vec![
                Span::styled(format!("{}: ", subscale.name(locale)), theme.header_style),
                Span::raw(format_score(score)),
                Span::raw(" ("),
                Span::styled(level.label(locale), Style::default().fg(theme.level_color(level))),
                Span::raw(")"),
            ])
        })
        .collect();
    let subscales = Paragraph::new(subscale_lines)
        .block(Block::bordered().title(locale.pick(" Subscales ", " サブスケール別スコア ")));
    frame.render_widget(subscales, cards[1]);
}

/// Angle of a subscale axis: Vigor at the top, then clockwise.
fn radar_angle(index: usize) -> f64 {
    (90.0 - 120.0 * index as f64).to_radians()
}

fn radar_point(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

fn render_radar_chart(
    frame: &mut Frame,
    area: Rect,
    report: &ScoreReport,
    locale: Locale,
    theme: &ThemeColors,
) {
    let block = Block::bordered().title(locale.pick(" Radar ", " レーダーチャート "));
    let inner = block.inner(area);
    if inner.width == 0 || inner.height == 0 {
        frame.render_widget(block, area);
        return;
    }

    // Cells are about twice as tall as wide; scale bounds so rings stay round
    let extent = RADAR_RADIUS + 1.5;
    let ratio = (inner.width as f64 * 0.5) / inner.height as f64;
    let (half_x, half_y) = if ratio >= 1.0 {
        (extent * ratio, extent)
    } else {
        (extent, extent / ratio)
    };
    let units_per_cell = 2.0 * half_x / inner.width as f64;

    let scores: Vec<f64> = Subscale::ALL.iter().map(|s| report.subscale(*s)).collect();
    let grid = theme.radar_grid;
    let line_color = theme.radar_line;
    let muted = theme.muted;

    let chart = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-half_x, half_x])
        .y_bounds([-half_y, half_y])
        .paint(move |ctx| {
            for ring in 1..=MAX_ANSWER {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: f64::from(ring),
                    color: grid,
                });
            }
            for index in 0..Subscale::ALL.len() {
                let (x, y) = radar_point(RADAR_RADIUS, radar_angle(index));
                ctx.draw(&canvas::Line {
                    x1: 0.0,
                    y1: 0.0,
                    x2: x,
                    y2: y,
                    color: grid,
                });
            }

            ctx.layer();

            for index in 0..scores.len() {
                let next = (index + 1) % scores.len();
                let (x1, y1) = radar_point(scores[index], radar_angle(index));
                let (x2, y2) = radar_point(scores[next], radar_angle(next));
                ctx.draw(&canvas::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: line_color,
                });
            }

            for (index, subscale) in Subscale::ALL.iter().enumerate() {
                let name = subscale.name(locale);
                let width = name.chars().count() as f64 * units_per_cell;
                let (x, y) = radar_point(RADAR_RADIUS + 0.8, radar_angle(index));
                let x = if x < -0.5 {
                    x - width
                } else if x <= 0.5 {
                    x - width / 2.0
                } else {
                    x
                };
                ctx.print(x, y, Span::styled(name, Style::default().fg(muted)));
            }
        });

    frame.render_widget(chart, area);
}

fn render_bar_chart(
    frame: &mut Frame,
    area: Rect,
    report: &ScoreReport,
    locale: Locale,
    theme: &ThemeColors,
) {
    let block = Block::bordered().title(locale.pick(" Scores (0-6) ", " スコア比較 (0-6) "));
    let inner_width = block.inner(area).width;

    let bars: Vec<Bar> = report
        .entries()
        .iter()
        .map(|(kind, score)| {
            let color = theme.level_color(level_of(*score));
            Bar::default()
                .value((score * 100.0).round() as u64)
                .text_value(format_score(*score))
                .label(Line::from(kind.name(locale)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color).bold())
        })
        .collect();

    let gap = 1;
    let count = bars.len() as u16;
    let bar_width = (inner_width.saturating_sub(gap * (count - 1)) / count).clamp(3, 12);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(gap)
        .max(u64::from(MAX_ANSWER) * 100);

    frame.render_widget(chart, area);
}

fn render_answer_table(frame: &mut Frame, area: Rect, app: &App) {
    let locale = app.config.locale;
    let theme = &app.theme;
    let Some(responses) = app.session.submitted_responses() else {
        return;
    };

    let rows: Vec<Row> = responses
        .iter()
        .enumerate()
        .map(|(idx, (id, value))| {
            let (text, subscale) = match item(id) {
                Some(item) => (item.text(locale), item.subscale.name(locale)),
                None => ("", ""),
            };
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("Q{}", id)).style(Style::default().fg(theme.muted)),
                Cell::from(text),
                Cell::from(subscale),
                Cell::from(value.to_string()),
                Cell::from(answer_label(value, locale).unwrap_or("")),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),   // "Q9"
        Constraint::Fill(1),     // Item text
        Constraint::Length(12),  // Subscale
        Constraint::Length(6),   // Answer
        Constraint::Length(32),  // Answer label
    ];

    let header = match locale {
        Locale::En => vec!["#", "Item", "Subscale", "Answer", "Frequency"],
        Locale::Ja => vec!["番号", "質問内容", "サブスケール", "回答", "回答ラベル"],
    };

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(theme.header_style))
        .block(Block::default().title(Span::styled(
            locale.pick("Answers", "回答詳細データ"),
            theme.title_style,
        )));

    frame.render_widget(table, area);
}

fn about_lines(locale: Locale, theme: &ThemeColors) -> Vec<Line<'static>> {
    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().fg(theme.title_color).bold()))
    };

    let mut lines = vec![
        heading(locale.pick("What is work engagement?", "ワークエンゲージメントとは")),
        Line::from(locale.pick(
            "Work engagement is a positive, fulfilling state of mind about work. The concept was \
             proposed by Prof. Schaufeli and colleagues at Utrecht University and is seen as the \
             opposite of burnout.",
            "ワークエンゲージメントとは、仕事に対するポジティブで充実した心理状態を指します。\
             オランダ・ユトレヒト大学のSchaufeli教授らによって提唱された概念で、\
             バーンアウト（燃え尽き症候群）の対極に位置づけられています。",
        )),
        Line::from(""),
        heading(locale.pick("About the UWES-9", "UWES-9について")),
        Line::from(locale.pick(
            "The Utrecht Work Engagement Scale is the most widely used instrument for measuring \
             work engagement. This check uses the nine-item version (UWES-9).",
            "UWES（Utrecht Work Engagement Scale）は、ワークエンゲージメントを測定する\
             国際的に最も広く使用されている尺度です。本診断では9項目版（UWES-9）を使用しています。",
        )),
        Line::from(""),
        heading(locale.pick("Subscales", "3つのサブスケール")),
    ];

    for subscale in Subscale::ALL {
        let ids: Vec<String> = subscale.items().map(|item| item.short_ref()).collect();
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", subscale.name(locale)), theme.header_style),
            Span::styled(format!("{:<14}", ids.join(", ")), Style::default().fg(theme.muted)),
            Span::raw(subscale.description(locale)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(heading(locale.pick("Score bands", "スコアの解釈目安")));
    for level in Level::ALL {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<12}", level.range_label())),
            Span::styled(level.label(locale), Style::default().fg(theme.level_color(level))),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(heading(locale.pick("References", "出典・参考文献")));
    lines.push(Line::from(
        "  Schaufeli, W.B., & Bakker, A.B. (2003). UWES - Utrecht Work Engagement Scale",
    ));
    if locale == Locale::Ja {
        lines.push(Line::from(
            "  島津明人 (2014). ワーク・エンゲイジメント：ポジティブ・メンタルヘルスで活力ある毎日を",
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        locale.pick(
            "Note: the UWES-9 was developed for academic research; commercial use requires the \
             authors' permission. Results are for reference only and are not a substitute for a \
             professional assessment.",
            "注意事項: 本診断は学術研究目的で開発されたUWES-9に基づいています。\
             営利目的での使用には著者の許可が必要です。\
             結果は参考情報であり、専門的な診断に代わるものではありません。",
        ),
        Style::default().fg(theme.unanswered),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "© Schaufeli & Bakker (2003) - UWES-9",
        Style::default().fg(theme.muted),
    )));
    lines
}

fn render_about(frame: &mut Frame, area: Rect, app: &App) {
    let about = Paragraph::new(about_lines(app.config.locale, &app.theme))
        .wrap(Wrap { trim: false })
        .scroll((app.about_scroll, 0));
    frame.render_widget(about, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Success => theme.flash_success,
            FlashKind::Error => theme.flash_error,
            FlashKind::Info => theme.text,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{}/{} answered", app.session.answered_count(), ITEMS.len());
        let state = app.session.state().label();

        let hints: &[(&str, &str)] = match app.current_tab {
            Tab::Questionnaire => &[
                ("j/k", ":nav "),
                ("h/l", ":adjust "),
                ("0-6", ":set "),
                ("Enter", ":submit "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Tab::Results => &[
                ("e", ":export "),
                ("r", ":revise "),
                ("R", ":reset "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Tab::About => &[
                ("j/k", ":scroll "),
                ("Tab", ":next "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![
            Span::styled(count, Style::default().fg(theme.muted)),
            Span::raw(" "),
            Span::styled(state, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    // Calculate centered position
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_reset_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(46, 4, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Start Over ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::from("Discard all answers and results?"),
        Line::from(Span::styled("y: yes | n / Esc: no", Style::default().fg(theme.muted))),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 19, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let shortcuts = [
        ("j / Down      ", "Next item (scroll on About)"),
        ("k / Up        ", "Previous item"),
        ("l / Right     ", "Increase answer"),
        ("h / Left      ", "Decrease answer"),
        ("0 - 6         ", "Set answer"),
        ("Backspace     ", "Clear answer"),
        ("Enter         ", "Submit and show results"),
        ("e             ", "Export results as CSV"),
        ("r             ", "Revise submitted answers"),
        ("R             ", "Start over"),
        ("Tab / 1 2 3   ", "Switch tab"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(theme.status_key_color).bold()),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
