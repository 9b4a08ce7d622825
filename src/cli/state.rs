use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::ListState;
use sqlx::{Pool, Sqlite};

use crate::cli::input::LineEdit;
use crate::database::models::{DailySummary, GoalWithProgress, MonthlySummary};
use crate::finance::{format, kst, DailyAmount, SavingsTotals};
use crate::services::{savings, summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Today,
    Monthly,
    Savings,
    Calendar,
    Help,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Today, Tab::Monthly, Tab::Savings, Tab::Calendar, Tab::Help];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Today => "Today",
            Tab::Monthly => "Monthly",
            Tab::Savings => "Savings",
            Tab::Calendar => "Calendar",
            Tab::Help => "Help",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn step(&self, delta: isize) -> Tab {
        let n = Tab::ALL.len() as isize;
        Tab::ALL[(self.index() as isize + delta).rem_euclid(n) as usize]
    }
}

/// Moves (year, month) by `delta` months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[derive(Default, Clone)]
pub struct DepositForm {
    pub amount: LineEdit,
    pub editing: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Default)]
pub struct SavingsPage {
    pub goals: Vec<GoalWithProgress>,
    pub sel: ListState,
    pub totals: SavingsTotals,
    pub deposit: DepositForm,
}

pub struct App {
    pub pool: Pool<Sqlite>,
    pub user_id: i64,
    pub tab: Tab,
    pub status: String,
    pub quit: bool,
    pub year: i32,
    pub month: u32,
    pub today: Option<DailySummary>,
    pub series: Vec<DailyAmount>,
    pub monthly: Option<MonthlySummary>,
    pub savings: SavingsPage,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl App {
    pub fn new(pool: Pool<Sqlite>, user_id: i64, now: DateTime<Utc>) -> Self {
        let (year, month) = kst::kst_year_month(now);
        Self {
            pool,
            user_id,
            tab: Tab::Today,
            status: "Tab: switch | ←/→: month | r: refresh | ?: help | q: quit".into(),
            quit: false,
            year,
            month,
            today: None,
            series: Vec::new(),
            monthly: None,
            savings: SavingsPage::default(),
            refreshed_at: None,
        }
    }

    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        let now = Utc::now();
        self.today = Some(summary::today_summary(&self.pool, self.user_id, now).await?);
        self.series = summary::expense_series(&self.pool, self.user_id, now, summary::DEFAULT_SERIES_DAYS).await?;
        self.refresh_month().await?;
        self.refresh_goals().await?;
        self.refreshed_at = Some(now);
        Ok(())
    }

    pub async fn refresh_month(&mut self) -> anyhow::Result<()> {
        self.monthly = Some(summary::monthly_summary(&self.pool, self.user_id, self.year, self.month).await?);
        Ok(())
    }

    pub async fn refresh_goals(&mut self) -> anyhow::Result<()> {
        self.savings.goals = savings::list_goal_progress(&self.pool, self.user_id, Utc::now()).await?;
        self.savings.totals = savings::savings_summary(&self.pool, self.user_id).await?;
        self.clamp_goal_selection();
        Ok(())
    }

    fn clamp_goal_selection(&mut self) {
        let len = self.savings.goals.len();
        match (len, self.savings.sel.selected()) {
            (0, _) => self.savings.sel.select(None),
            (n, Some(i)) if i >= n => self.savings.sel.select(Some(n - 1)),
            (_, None) => self.savings.sel.select(Some(0)),
            _ => {}
        }
    }

    fn move_goal(&mut self, delta: isize) {
        let n = self.savings.goals.len();
        if n == 0 { self.savings.sel.select(None); return; }
        let cur = self.savings.sel.selected().unwrap_or(0) as isize;
        let next = (cur + delta).rem_euclid(n as isize) as usize;
        self.savings.sel.select(Some(next));
    }

    pub fn current_goal(&self) -> Option<&GoalWithProgress> {
        let idx = self.savings.sel.selected()?;
        self.savings.goals.get(idx)
    }

    async fn shift_selected_month(&mut self, delta: i32) -> anyhow::Result<()> {
        let (year, month) = shift_month(self.year, self.month, delta);
        self.year = year;
        self.month = month;
        self.status = format!("Showing {}", format::fmt_year_month(year, month));
        self.refresh_month().await
    }

    async fn submit_deposit(&mut self) -> anyhow::Result<()> {
        let form = &mut self.savings.deposit;
        form.error = None;
        form.success = None;

        let Some(amount) = format::parse_amount(&form.amount.value) else {
            form.error = Some("Enter a positive amount".into());
            return Ok(());
        };
        let Some(goal_id) = self.current_goal().map(|g| g.goal.id) else {
            self.savings.deposit.error = Some("No goal selected".into());
            return Ok(());
        };

        match savings::deposit(&self.pool, self.user_id, goal_id, amount, Utc::now()).await {
            Ok(receipt) => {
                let form = &mut self.savings.deposit;
                form.success = Some(format!(
                    "{} +{} → {}",
                    receipt.goal.goal.name,
                    format::fmt_won(amount),
                    format::fmt_won(receipt.goal.goal.current_amount)
                ));
                form.amount.clear();
                form.editing = false;
                self.refresh().await?;
            }
            Err(e) => self.savings.deposit.error = Some(e.to_string()),
        }
        Ok(())
    }

    fn handle_deposit_input(&mut self, k: KeyEvent) -> bool {
        let form = &mut self.savings.deposit;
        match k.code {
            KeyCode::Esc => {
                form.editing = false;
                form.amount.clear();
                form.error = None;
            }
            KeyCode::Enter => return true,
            KeyCode::Char(c) if c.is_ascii_digit() || c == ',' => form.amount.push(c),
            KeyCode::Backspace => form.amount.backspace(),
            KeyCode::Delete => form.amount.delete(),
            KeyCode::Left => form.amount.left(),
            KeyCode::Right => form.amount.right(),
            _ => {}
        }
        false
    }

    pub async fn handle_key(&mut self, k: KeyEvent) -> anyhow::Result<()> {
        if k.kind != KeyEventKind::Press { return Ok(()); }

        if self.tab == Tab::Savings && self.savings.deposit.editing {
            if self.handle_deposit_input(k) {
                self.submit_deposit().await?;
            }
            return Ok(());
        }

        match k.code {
            KeyCode::Char('q') => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Tab => self.tab = self.tab.step(1),
            KeyCode::BackTab => self.tab = self.tab.step(-1),
            KeyCode::Char(c @ '1'..='5') => {
                self.tab = Tab::ALL[c as usize - '1' as usize];
            }
            KeyCode::Char('?') => self.tab = Tab::Help,
            KeyCode::Char('r') => {
                self.refresh().await?;
                self.status = "Refreshed".into();
            }
            KeyCode::Left => self.shift_selected_month(-1).await?,
            KeyCode::Right => self.shift_selected_month(1).await?,
            _ => {}
        }

        if self.tab == Tab::Savings {
            match k.code {
                KeyCode::Up => self.move_goal(-1),
                KeyCode::Down => self.move_goal(1),
                KeyCode::Char('d') if self.current_goal().is_some() => {
                    let form = &mut self.savings.deposit;
                    form.editing = true;
                    form.error = None;
                    form.success = None;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_shift_wraps_years() {
        assert_eq!(shift_month(2025, 1, -1), (2024, 12));
        assert_eq!(shift_month(2025, 12, 1), (2026, 1));
        assert_eq!(shift_month(2025, 6, 0), (2025, 6));
        assert_eq!(shift_month(2025, 3, -15), (2023, 12));
    }

    #[test]
    fn tabs_cycle() {
        assert_eq!(Tab::Today.step(-1), Tab::Help);
        assert_eq!(Tab::Help.step(1), Tab::Today);
        assert_eq!(Tab::Savings.index(), 2);
    }
}
