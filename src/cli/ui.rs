use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::cli::state::{App, Tab};
use crate::finance::{format::{fmt_kst, fmt_won, fmt_year_month, iso, weekday_ko}, holidays, kst};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();

    // top tabs | main content | bottom status bar
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(1)])
        .split(size);

    let titles = Tab::ALL
        .iter()
        .map(|t| Line::from(Span::raw(t.title())))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("가계부 · {}", fmt_year_month(app.year, app.month))),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(tabs, root[0]);

    match app.tab {
        Tab::Today => draw_today(f, root[1], app),
        Tab::Monthly => draw_monthly(f, root[1], app),
        Tab::Savings => draw_savings(f, root[1], app),
        Tab::Calendar => draw_calendar(f, root[1], app),
        Tab::Help => draw_help(f, root[1]),
    }

    f.render_widget(Paragraph::new(app.status.as_str()), root[2]);
}

// Today

fn draw_today(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(8)])
        .split(area);

    let text = match &app.today {
        Some(t) => {
            let title = match &t.holiday {
                Some(name) => format!("{} ({}) · {}", iso(&t.date), weekday_ko(t.weekday), name),
                None => format!("{} ({})", iso(&t.date), weekday_ko(t.weekday)),
            };
            vec![
                title,
                format!("수입  : {} ({}건)", fmt_won(t.income.total), t.income.count),
                format!("지출  : {} ({}건)", fmt_won(t.expense.total), t.expense.count),
                format!("저축  : {} ({}건)", fmt_won(t.savings.total), t.savings.count),
            ]
            .join("\n")
        }
        None => "Loading…".into(),
    };
    let title = match app.refreshed_at {
        Some(at) => format!("Today · {} 기준", fmt_kst(at)),
        None => "Today".into(),
    };
    let p = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, rows[0]);

    let labels: Vec<String> = app
        .series
        .iter()
        .map(|d| format!("{:02}/{:02}", d.date.month(), d.date.day()))
        .collect();
    let bars: Vec<Bar> = app
        .series
        .iter()
        .zip(labels.iter())
        .map(|(d, label)| {
            Bar::default()
                .value(d.amount.max(0) as u64)
                .label(Line::from(label.as_str()))
                .text_value(fmt_won(d.amount))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("지출 (최근 7일)"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1);
    f.render_widget(chart, rows[1]);
}

// Monthly

fn draw_monthly(f: &mut Frame, area: Rect, app: &App) {
    let Some(m) = &app.monthly else {
        f.render_widget(Paragraph::new("Loading…").block(Block::default().borders(Borders::ALL)), area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let totals = vec![
        format!("수입    : {} ({}건)", fmt_won(m.total_income), m.income_count),
        format!("지출    : {} ({}건)", fmt_won(m.total_expense), m.expense_count),
        format!("  저축  : {} ({}건)", fmt_won(m.total_savings), m.savings_count),
        format!("잔액    : {}", fmt_won(m.balance)),
    ]
    .join("\n");
    let p = Paragraph::new(totals).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{} 요약  (←/→ 월 이동)", fmt_year_month(m.year, m.month))),
    );
    f.render_widget(p, rows[0]);

    let budget_title = if m.budget.amount > 0 {
        format!(
            "예산 {} · 남은 금액 {}",
            fmt_won(m.budget.amount),
            fmt_won(m.budget.remaining)
        )
    } else {
        "예산 미설정".to_string()
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(budget_title))
        .gauge_style(Style::default().fg(usage_color(m.budget.usage_percent)))
        .percent(m.budget.usage_percent.clamp(0, 100) as u16);
    f.render_widget(gauge, rows[1]);

    let header = Row::new(vec!["", "카테고리", "금액", "건수", "예산 사용"]).height(1);
    let body: Vec<Row> = m
        .categories
        .iter()
        .map(|c| {
            let usage = c
                .budget
                .map(|b| format!("{}% / {}", b.usage_percent, fmt_won(b.amount)))
                .unwrap_or_else(|| "-".into());
            Row::new(vec![
                Cell::from(c.icon.clone()),
                Cell::from(c.name.clone()),
                Cell::from(fmt_won(c.total)),
                Cell::from(c.count.to_string()),
                Cell::from(usage),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(30),
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Min(18),
    ];
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("카테고리별 지출"));
    f.render_widget(table, rows[2]);
}

fn usage_color(percent: i64) -> Color {
    match percent {
        p if p >= 100 => Color::Red,
        p if p >= 80 => Color::Yellow,
        _ => Color::Green,
    }
}

// Savings

fn draw_savings(f: &mut Frame, area: Rect, app: &mut App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let items: Vec<ListItem> = app
        .savings
        .goals
        .iter()
        .map(|g| {
            let star = if g.goal.is_primary { "★ " } else { "  " };
            ListItem::new(Line::from(format!(
                "{star}{} {}  {} / {}  ({}%)",
                g.goal.icon,
                g.goal.name,
                fmt_won(g.goal.current_amount),
                fmt_won(g.goal.target_amount),
                g.progress.progress_percent
            )))
        })
        .collect();
    let totals = app.savings.totals;
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Goals · {} / {} ({}%)  (↑/↓, d=deposit)",
            fmt_won(totals.total_current_amount),
            fmt_won(totals.total_target_amount),
            totals.progress_percent
        )))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, cols[0], &mut app.savings.sel);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(7)])
        .split(cols[1]);

    let details = match app.current_goal() {
        Some(g) => vec![
            format!("{} {}", g.goal.icon, g.goal.name),
            format!("목표    : {}", fmt_won(g.goal.target_amount)),
            format!("현재    : {}", fmt_won(g.goal.current_amount)),
            format!("남은 금액: {}", fmt_won(g.progress.amount_remaining)),
            format!("기한    : {} ({}개월)", fmt_year_month(g.goal.target_year, g.goal.target_month), g.progress.months_remaining),
            format!("월 필요액: {}", fmt_won(g.progress.monthly_required)),
        ]
        .join("\n"),
        None => "No active goal".into(),
    };
    f.render_widget(
        Paragraph::new(details).block(Block::default().borders(Borders::ALL).title("Details")),
        right[0],
    );

    let form = &app.savings.deposit;
    let input = if form.editing { form.amount.rendered() } else { form.amount.value.clone() };
    let lines = vec![
        format!("Amount : {}{}", input, if form.editing { "  <editing>" } else { "" }),
        "d: edit | Enter: deposit | Esc: cancel".into(),
        if let Some(err) = &form.error {
            format!("Error: {}", err)
        } else if let Some(ok) = &form.success {
            format!("Saved: {}", ok)
        } else {
            String::new()
        },
    ]
    .join("\n");
    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Deposit"))
        .wrap(Wrap { trim: true });
    f.render_widget(p, right[1]);
}

// Calendar

fn draw_calendar(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(20)])
        .split(area);

    let holiday_days = holidays::holiday_days_in_month(app.year, app.month);
    let today = kst::kst_date(chrono::Utc::now());

    let header = Row::new((0..7).map(|w| {
        let style = if w == 0 { Style::default().fg(Color::Red) } else { Style::default() };
        Cell::from(weekday_ko(w)).style(style)
    }));

    let mut weeks: Vec<Row> = Vec::new();
    if let (Ok(first), Ok(days)) = (kst::first_of_month(app.year, app.month), kst::days_in_month(app.year, app.month)) {
        let lead = first.weekday().num_days_from_sunday() as usize;
        let mut cells: Vec<Cell> = (0..lead).map(|_| Cell::from("")).collect();
        for day in 1..=days {
            let date = NaiveDate::from_ymd_opt(app.year, app.month, day);
            let mut style = Style::default();
            if holiday_days.contains(&day) || (cells.len() % 7 == 0) {
                style = style.fg(Color::Red);
            }
            if date == Some(today) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            cells.push(Cell::from(format!("{day:>2}")).style(style));
            if cells.len() == 7 {
                weeks.push(Row::new(std::mem::take(&mut cells)));
            }
        }
        if !cells.is_empty() {
            weeks.push(Row::new(cells));
        }
    }

    let widths = [Constraint::Length(4); 7];
    let table = Table::new(weeks, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(fmt_year_month(app.year, app.month)));
    f.render_widget(table, cols[0]);

    let items: Vec<ListItem> = holidays::holidays_in_month(app.year, app.month)
        .into_iter()
        .map(|h| ListItem::new(format!("{}  {}", iso(&h.date), h.name)))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("공휴일"));
    f.render_widget(list, cols[1]);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help_text = vec![
        "Global Keys:",
        "  q          : Quit",
        "  Tab/S-Tab  : Next / previous tab",
        "  1-5        : Jump to tab",
        "  ←/→        : Previous / next month",
        "  r          : Refresh",
        "  ?          : This help",
        "",
        "Savings Tab:",
        "  ↑/↓        : Select goal",
        "  d          : Enter a deposit amount",
        "  Enter      : Deposit into the selected goal",
        "  Esc        : Cancel",
        "",
        "Today shows spending without savings deposits; the monthly",
        "total includes them and lists savings on its own line.",
    ]
    .join("\n");

    let p = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title("Help & Keybindings"));
    f.render_widget(p, area);
}
