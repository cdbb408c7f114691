// Timeline Planner demo
// Seeds an in-memory store with a sample team plan, runs a recurrence and
// a drag commit through the planner, and prints the packed timeline.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use timeline_planner::models::recurrence::{Frequency, RecurrenceRule};
use timeline_planner::models::task::{MemberId, ProjectId, Task, TaskId};
use timeline_planner::services::drag::session::DragRelease;
use timeline_planner::services::drag::DragMode;
use timeline_planner::services::planner::Planner;
use timeline_planner::services::settings as settings_file;
use timeline_planner::services::store::memory::MemoryStore;
use timeline_planner::services::timeline::grouping::GroupKey;
use timeline_planner::services::timeline::DateWindow;
use timeline_planner::utils::date::format_range;

struct Team {
    members: Vec<(MemberId, &'static str)>,
}

impl Team {
    fn name(&self, id: MemberId) -> &'static str {
        self.members
            .iter()
            .find(|(member, _)| *member == id)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Starting timeline planner demo");

    let settings = settings_file::default_path()
        .map(|path| settings_file::load_or_default(&path))
        .unwrap_or_default();

    let mut planner = Planner::new(MemoryStore::new(), settings);
    let (team, docs_task) = seed_sample_plan(&mut planner)?;

    // Drag the docs task three day columns to the right and commit the
    // release, the same path a pointer drag takes in a client.
    let task = planner
        .snapshot()?
        .into_iter()
        .find(|t| t.id == docs_task)
        .ok_or_else(|| anyhow!("seeded task disappeared"))?;
    let mut session = planner.drag_session();
    session.begin(&task, DragMode::Move);
    session.update_pointer(3.0 * planner.settings().day_column_px);
    if let Some(DragRelease::Commit(commit)) = session.finish() {
        let updated = planner.commit_drag(commit)?;
        println!(
            "Rescheduled {:?} to {}\n",
            updated.title,
            format_range(updated.start_date, updated.end_date)
        );
    }

    let window = DateWindow::new(ymd(2025, 3, 1)?, ymd(2025, 3, 31)?).map_err(|e| anyhow!(e))?;
    if std::env::args().any(|arg| arg == "--json") {
        println!("{}", serde_json::to_string_pretty(&planner.snapshot()?)?);
        return Ok(());
    }

    render_timeline(&planner, window, &team)
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid date {}-{}-{}", year, month, day))
}

fn seed_sample_plan(planner: &mut Planner<MemoryStore>) -> Result<(Team, TaskId)> {
    let ada = MemberId::new();
    let grace = MemberId::new();
    let linus = MemberId::new();
    let apollo = ProjectId::new();

    let build = |title: &str, start: NaiveDate, end: NaiveDate| -> Result<Task> {
        Task::new(title, start, end).map_err(|e| anyhow!(e))
    };

    let mut design = build("Design review", ymd(2025, 3, 4)?, ymd(2025, 3, 6)?)?;
    design.assignee_ids = vec![ada];
    design.project_id = Some(apollo);
    planner.create_task(design)?;

    let mut api = build("API integration", ymd(2025, 3, 5)?, ymd(2025, 3, 11)?)?;
    api.assignee_ids = vec![ada];
    api.project_id = Some(apollo);
    planner.create_task(api)?;

    let mut bench = build("Benchmark sweep", ymd(2025, 3, 10)?, ymd(2025, 3, 14)?)?;
    bench.assignee_ids = vec![grace];
    planner.create_task(bench)?;

    let mut release = build("Release prep", ymd(2025, 3, 17)?, ymd(2025, 3, 21)?)?;
    release.assignee_ids = vec![grace, linus];
    release.project_id = Some(apollo);
    planner.create_task(release)?;

    let mut docs = build("Docs pass", ymd(2025, 3, 19)?, ymd(2025, 3, 20)?)?;
    docs.assignee_ids = vec![linus];
    let docs = planner.create_task(docs)?;

    planner.create_task(build("Plan offsite", ymd(2025, 3, 25)?, ymd(2025, 3, 27)?)?)?;

    let mut standup = build("Weekly standup", ymd(2025, 3, 3)?, ymd(2025, 3, 3)?)?;
    standup.assignee_ids = vec![ada];
    let series = planner.create_series(standup, &RecurrenceRule::count(Frequency::Weekly, 4))?;
    println!(
        "Created a weekly series of {} standups starting {}",
        series.len(),
        series[0].start_date
    );

    let team = Team {
        members: vec![(ada, "ada"), (grace, "grace"), (linus, "linus")],
    };
    Ok((team, docs.id))
}

fn render_timeline(planner: &Planner<MemoryStore>, window: DateWindow, team: &Team) -> Result<()> {
    // Render at one character per day so bar pixels map straight to cells.
    let mut render_settings = planner.settings().clone();
    render_settings.day_column_px = 1.0;
    let snapshot = planner.snapshot()?;
    let layout = timeline_planner::services::timeline::geometry::layout(
        &snapshot,
        window,
        &render_settings,
    );

    println!("Timeline {}", format_range(window.start, window.end));
    let days = window.days() as usize;
    println!("{:<14} {}", "", ruler(days));

    for group in &layout.groups {
        let label = match group.key {
            GroupKey::Member(id) => team.name(id).to_string(),
            GroupKey::Unassigned => "unassigned".to_string(),
            GroupKey::Project(_) => format!("{}", group.key),
            GroupKey::NoProject => "no project".to_string(),
        };

        for lane in 0..group.lane_count {
            let mut row = vec!['.'; days];
            for bar in group.bars.iter().filter(|b| b.lane == lane) {
                paint_bar(&mut row, bar.x, bar.width, bar.clipped_start, bar.clipped_end);
            }
            let row: String = row.into_iter().collect();
            let prefix = if lane == 0 { label.as_str() } else { "" };
            println!("{:<14} {}", prefix, row);
        }
    }
    Ok(())
}

fn ruler(days: usize) -> String {
    (1..=days)
        .map(|day| match day {
            1 => '1',
            d if d % 10 == 0 => std::char::from_digit((d / 10) as u32, 10).unwrap_or('.'),
            _ => '.',
        })
        .collect()
}

fn paint_bar(row: &mut [char], x: f32, width: f32, clipped_start: bool, clipped_end: bool) {
    let start = x as usize;
    let len = (width as usize).max(1);
    let end = (start + len).min(row.len());
    for cell in row.iter_mut().take(end).skip(start) {
        *cell = '=';
    }
    if start < row.len() {
        row[start] = if clipped_start { '<' } else { '[' };
    }
    if end > start && end <= row.len() {
        row[end - 1] = if clipped_end { '>' } else { ']' };
    }
}
