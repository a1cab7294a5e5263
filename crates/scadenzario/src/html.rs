use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::calendar::{self, MonthGrid};
use crate::export::{self, ExportSummary};
use crate::timetable;
use crate::types::{ClassSession, Priority, Task, TimeBand, User, Weekday};
use crate::views;

/// Sidebar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Dashboard,
    Calendar,
    Timetable,
    Exports,
    Profile,
}

impl Nav {
    const ALL: [Nav; 5] = [
        Nav::Dashboard,
        Nav::Calendar,
        Nav::Timetable,
        Nav::Exports,
        Nav::Profile,
    ];

    fn href(&self) -> &'static str {
        match self {
            Nav::Dashboard => "/dashboard",
            Nav::Calendar => "/calendar",
            Nav::Timetable => "/timetable",
            Nav::Exports => "/exports",
            Nav::Profile => "/profile",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Nav::Dashboard => "Dashboard",
            Nav::Calendar => "Calendar",
            Nav::Timetable => "Timetable",
            Nav::Exports => "Exports",
            Nav::Profile => "Profile",
        }
    }
}

/// Write a rendered page to disk
pub fn write_page(markup: Markup, path: &Path) -> Result<()> {
    fs::write(path, markup.into_string())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn document(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Scadenzario" }
                style { (PreEscaped(CSS)) }
            }
            body {
                (body)
                script { (PreEscaped(JAVASCRIPT)) }
            }
        }
    }
}

fn layout(title: &str, active: Nav, user: &User, content: Markup) -> Markup {
    document(
        title,
        html! {
            div.app {
                nav.sidebar {
                    div.brand { "Scadenzario" }
                    ul {
                        @for item in Nav::ALL {
                            li {
                                a.active[item == active] href=(item.href()) { (item.label()) }
                            }
                        }
                    }
                    div.sidebar-user {
                        span.avatar { (user.initials()) }
                        div {
                            div.user-name { (user.name) }
                            div.user-email { (user.email) }
                        }
                    }
                    a.logout href="/login" { "Log out" }
                }
                main.content { (content) }
            }
        },
    )
}

fn page_header(title: &str, subtitle: &str) -> Markup {
    html! {
        header.page-header {
            h1 { (title) }
            p.muted { (subtitle) }
        }
    }
}

// ========== Auth ==========

/// Login form. Submitting it goes straight to the dashboard.
pub fn render_login() -> Markup {
    document(
        "Login",
        html! {
            div.auth {
                h1 { "Student Task Organizer" }
                p.muted { "Manage your academic tasks efficiently" }
                form.card method="post" action="/login" {
                    h2 { "Login to your account" }
                    label for="email" { "Email" }
                    input id="email" type="email" name="email" placeholder="your.email@university.edu" required;
                    label for="password" { "Password" }
                    input id="password" type="password" name="password" required;
                    label.inline {
                        input type="checkbox" name="remember";
                        " Remember me"
                    }
                    button type="submit" { "Login" }
                    p.muted { "Don't have an account? " a href="/register" { "Register" } }
                }
            }
        },
    )
}

pub fn render_register() -> Markup {
    document(
        "Register",
        html! {
            div.auth {
                h1 { "Student Task Organizer" }
                p.muted { "Create an account to start tracking deadlines" }
                form.card method="post" action="/register" {
                    h2 { "Create an account" }
                    label for="name" { "Full name" }
                    input id="name" type="text" name="name" required;
                    label for="email" { "Email" }
                    input id="email" type="email" name="email" placeholder="your.email@university.edu" required;
                    label for="password" { "Password" }
                    input id="password" type="password" name="password" required;
                    button type="submit" { "Register" }
                    p.muted { "Already have an account? " a href="/login" { "Login" } }
                }
            }
        },
    )
}

// ========== Dashboard ==========

pub fn render_dashboard(tasks: &[Task], user: &User, now: NaiveDateTime, horizon_days: i64) -> Markup {
    let summary = views::summary(tasks);
    let counts = views::priority_counts(tasks);
    let upcoming = views::upcoming(tasks, now, horizon_days);
    let active = views::incomplete(tasks);
    let done = views::completed(tasks);

    let content = html! {
        (page_header("Dashboard", "Manage your tasks and deadlines"))
        div.cards {
            div.card {
                div.card-title { "Total Tasks" }
                div.card-value { (summary.total) }
                p.muted { (summary.active) " active, " (summary.completed) " completed" }
            }
            @for (priority, hint) in [
                (Priority::Urgent, "urgent tasks require immediate attention"),
                (Priority::High, "high priority tasks need attention soon"),
            ] {
                div.card {
                    div.card-title {
                        "Priority: " (priority.label())
                        " " span.badge.(priority.css_class()) { (counts.get(priority)) }
                    }
                    div.card-value { (counts.get(priority)) }
                    p.muted { (hint) }
                }
            }
            div.card {
                div.card-title { "Coming up soon" }
                div.card-value { (upcoming.len()) }
                p.muted { "tasks due in the next " (horizon_days) " days" }
            }
        }
        details.card.new-task {
            summary { "Add Task" }
            (task_form(None, "/dashboard", now))
        }
        section.tabs {
            (task_section("All Tasks", &active, now, "No tasks found. Add your first task to get started!"))
            (task_section(
                "Upcoming",
                &upcoming,
                now,
                &format!("No upcoming tasks due in the next {} days.", horizon_days),
            ))
            (task_section("Completed", &done, now, "No completed tasks yet."))
        }
    };

    layout("Dashboard", Nav::Dashboard, user, content)
}

fn task_section(title: &str, tasks: &[&Task], now: NaiveDateTime, empty: &str) -> Markup {
    html! {
        section.task-section {
            h2 { (title) " " span.count { (tasks.len()) } }
            @if tasks.is_empty() {
                div.empty-state { p { (empty) } }
            } @else {
                @for task in tasks {
                    (task_item(task, now, "/dashboard"))
                }
            }
        }
    }
}

fn task_item(task: &Task, now: NaiveDateTime, back: &str) -> Markup {
    let overdue = views::is_overdue(task, now);
    html! {
        div.task-item.completed[task.completed] data-task-id=(task.id) draggable="true" {
            form method="post" action={"/tasks/" (task.id) "/toggle"} {
                input type="hidden" name="back" value=(back);
                button.check type="submit" title="Toggle complete" {
                    @if task.completed { "☑" } @else { "☐" }
                }
            }
            div.task-body {
                div.task-head {
                    h3 { (task.title) }
                    (priority_badge(task.priority))
                }
                @if !task.description.is_empty() {
                    p.muted { (task.description) }
                }
                p.due.overdue[overdue] {
                    @if overdue { "Overdue: " } @else { "Due: " }
                    (format_due(task.deadline))
                }
                details.edit {
                    summary { "Edit" }
                    (task_form(Some(task), back, now))
                }
                form method="post" action={"/tasks/" (task.id) "/delete"} {
                    input type="hidden" name="back" value=(back);
                    button.danger type="submit" { "Delete" }
                }
            }
        }
    }
}

fn task_form(task: Option<&Task>, back: &str, now: NaiveDateTime) -> Markup {
    let action = match task {
        Some(t) => format!("/tasks/{}/update", t.id),
        None => "/tasks".to_string(),
    };
    let deadline = task.map(|t| t.deadline).unwrap_or(now);
    let priority = task.map(|t| t.priority).unwrap_or_default();

    html! {
        form.task-form method="post" action=(action) {
            input type="hidden" name="back" value=(back);
            label { "Title" }
            input type="text" name="title" placeholder="Task title" value=[task.map(|t| t.title.as_str())] required;
            label { "Description" }
            textarea name="description" placeholder="Add details about your task" {
                @if let Some(t) = task { (t.description) }
            }
            label { "Deadline" }
            input type="datetime-local" name="deadline" value=(deadline.format("%Y-%m-%dT%H:%M").to_string()) required;
            label { "Priority" }
            div.priorities {
                @for p in Priority::ALL {
                    label.inline.(p.css_class()) {
                        input type="radio" name="priority" value=(p.as_str()) checked[p == priority];
                        " " (p.label())
                    }
                }
            }
            button type="submit" {
                @if task.is_some() { "Update Task" } @else { "Create Task" }
            }
        }
    }
}

fn priority_badge(priority: Priority) -> Markup {
    html! {
        span.badge.(priority.css_class()) { (priority.label()) }
    }
}

/// "May 15, 2025"
fn format_due(deadline: NaiveDateTime) -> String {
    deadline.format("%B %-d, %Y").to_string()
}

// ========== Calendar ==========

pub fn render_calendar(tasks: &[Task], user: &User, selected: NaiveDate, now: NaiveDateTime) -> Markup {
    let grid = MonthGrid::for_date(selected, tasks);
    let day_tasks = views::tasks_on_date(tasks, selected);
    let back = format!("/calendar?date={}", selected.format("%Y-%m-%d"));
    let busy_days = grid.days().filter(|c| !c.indicator.is_empty()).count();

    let content = html! {
        (page_header("Calendar", "View your deadlines, exams, and schedule"))
        div.calendar-layout {
            div.card.month {
                div.month-nav {
                    a href={"/calendar?date=" (calendar::previous_month(selected).format("%Y-%m-%d").to_string())} { "‹" }
                    h2 { (grid.title()) }
                    a href={"/calendar?date=" (calendar::next_month(selected).format("%Y-%m-%d").to_string())} { "›" }
                }
                table.month-grid {
                    thead {
                        tr {
                            @for name in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
                                th { (name) }
                            }
                        }
                    }
                    tbody {
                        @for week in &grid.weeks {
                            tr {
                                @for cell in week {
                                    @match cell {
                                        Some(day) => {
                                            td.day.selected[day.date == selected].today[day.date == now.date()] data-date=(day.date.format("%Y-%m-%d").to_string()) {
                                                a href={"/calendar?date=" (day.date.format("%Y-%m-%d").to_string())} {
                                                    (day.date.format("%-d").to_string())
                                                }
                                                @if !day.indicator.is_empty() {
                                                    div.dots {
                                                        @if day.indicator.has_urgent { span.dot.priority-urgent {} }
                                                        @if day.indicator.has_high { span.dot.priority-high {} }
                                                        @if day.indicator.has_other { span.dot.other {} }
                                                    }
                                                }
                                            }
                                        }
                                        None => { td.pad {} }
                                    }
                                }
                            }
                        }
                    }
                }
                p.muted.hint {
                    (busy_days) " days with deadlines this month. Drag a task onto a day to reschedule it."
                }
            }
            div.day-list {
                h3 { "Tasks for " (selected.format("%B %-d, %Y").to_string()) }
                @if day_tasks.is_empty() {
                    div.empty-state { p { "No tasks for this day" } }
                } @else {
                    @for task in &day_tasks {
                        (task_item(task, now, &back))
                    }
                }
                details.card.new-task {
                    summary { "Add Task" }
                    (task_form(None, &back, selected.and_time(now.time())))
                }
            }
        }
    };

    layout("Calendar", Nav::Calendar, user, content)
}

// ========== Timetable ==========

pub fn render_timetable(classes: &[ClassSession], tasks: &[Task], user: &User) -> Markup {
    let labels = timetable::slot_labels();

    let mut sorted: Vec<Task> = tasks.to_vec();
    sorted.sort_by_key(|t| t.deadline);
    let week = views::group_by_weekday(&sorted);

    let content = html! {
        (page_header("Timetable", "View your weekly schedule and classes"))
        div.card.timetable {
            table.class-grid {
                thead {
                    tr {
                        th {}
                        @for day in Weekday::SCHOOL_DAYS { th { (day.name()) } }
                    }
                }
                tbody {
                    @for (slot, label) in labels.iter().enumerate() {
                        tr {
                            th.slot { (label) }
                            @for day in Weekday::SCHOOL_DAYS {
                                td {
                                    @for class in timetable::classes_at(classes, day, slot) {
                                        @let span = timetable::duration_slots(class.start_time, class.end_time);
                                        div.class-block.(class.color.as_deref().unwrap_or("default"))
                                            style={"height: calc(" (span * 100) "% - 4px)"} {
                                            div.class-title { (class.title) }
                                            div.muted { (class.location) }
                                            div.muted { (class.instructor) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        h2 { "Tasks by day" " " span.count { (week.len()) } }
        @if week.is_empty() {
            div.empty-state { p { "No tasks scheduled" } }
        }
        div.card {
            table.task-week {
                thead {
                    tr {
                        th { "Day" }
                        @for band in TimeBand::ALL { th { (band.name()) } }
                    }
                }
                tbody {
                    @for weekday in Weekday::ALL {
                        tr.quiet[week.day(weekday).is_empty()] {
                            th { (weekday.name()) }
                            @for band in TimeBand::ALL {
                                td {
                                    @let cell = week.cell(weekday, band);
                                    @if cell.is_empty() {
                                        span.muted { "No tasks" }
                                    } @else {
                                        @for task in cell {
                                            div.mini-task.completed[task.completed] {
                                                span.dot.(task.priority.css_class()) {}
                                                span { (task.title) }
                                                span.badge { (task.deadline.format("%-I:%M %p").to_string()) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    layout("Timetable", Nav::Timetable, user, content)
}

// ========== Exports ==========

pub fn render_exports(tasks: &[Task], user: &User, error: Option<&str>) -> Markup {
    let ExportSummary {
        total,
        completed,
        pending,
        urgent,
    } = export::export_summary(tasks);

    let content = html! {
        (page_header("Export Tasks", "Export your tasks for backup or sharing"))
        div.cards.two {
            form.card method="get" action="/exports/download" {
                h2 { "Export Format" }
                p.muted { "Choose the format in which you want to export your tasks" }
                label.option {
                    input type="radio" name="format" value="csv" checked;
                    strong { "CSV Format" }
                    span.muted { "Comma-separated values, for Excel, Google Sheets and other spreadsheet applications." }
                }
                label.option {
                    input type="radio" name="format" value="pdf";
                    strong { "PDF Format" }
                    span.muted { "A PDF document, for printing or sharing with others." }
                }
                @if let Some(message) = error {
                    p.error { (message) }
                }
                button type="submit" { "Export " (total) " Tasks" }
            }
            div.card {
                h2 { "Task Summary" }
                p.muted { "A quick overview of your tasks before exporting" }
                dl.summary {
                    dt { "Total Tasks" } dd { (total) }
                    dt { "Completed" } dd { (completed) }
                    dt { "Pending" } dd { (pending) }
                    dt { "Urgent" } dd.priority-urgent { (urgent) }
                }
            }
        }
    };

    layout("Exports", Nav::Exports, user, content)
}

// ========== Profile ==========

pub fn render_profile(user: &User, notice: Option<&str>) -> Markup {
    let content = html! {
        (page_header("Your Profile", "Manage your personal information and preferences"))
        form.card method="post" action="/profile" {
            h2 { "Personal Information" }
            div.avatar.large { (user.initials()) }
            label for="name" { "Full Name" }
            input id="name" type="text" name="name" value=(user.name) required;
            label for="email" { "Email Address" }
            input id="email" type="email" name="email" value=(user.email) required;
            @if let Some(message) = notice {
                p.notice { (message) }
            }
            button type="submit" { "Save Changes" }
        }
    };

    layout("Profile", Nav::Profile, user, content)
}

const CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Inter', sans-serif;
    background: #f6f7fb;
    color: #1f2430;
    line-height: 1.45;
}

a { color: #0077ff; text-decoration: none; }
h1 { font-size: 1.9em; font-weight: 700; letter-spacing: -0.02em; }
h2 { font-size: 1.15em; margin-bottom: 10px; }
h3 { font-size: 1em; }
.muted { color: #6b7280; font-size: 0.9em; }

.app { display: flex; min-height: 100vh; }
.sidebar {
    width: 220px;
    background: #fff;
    border-right: 1px solid #e5e7eb;
    padding: 24px 16px;
    display: flex;
    flex-direction: column;
    gap: 20px;
}
.sidebar ul { list-style: none; display: grid; gap: 4px; }
.sidebar li a { display: block; padding: 8px 12px; border-radius: 8px; color: #1f2430; }
.sidebar li a.active { background: #e8f1ff; color: #0077ff; font-weight: 600; }
.brand { font-weight: 800; font-size: 1.2em; }
.sidebar-user { margin-top: auto; display: flex; gap: 10px; align-items: center; font-size: 0.85em; }
.avatar {
    display: inline-flex; align-items: center; justify-content: center;
    width: 36px; height: 36px; border-radius: 50%;
    background: #0077ff; color: #fff; font-weight: 700;
}
.avatar.large { width: 96px; height: 96px; font-size: 2em; margin: 8px auto 16px; display: flex; }

.content { flex: 1; padding: 32px; display: grid; gap: 24px; align-content: start; }
.page-header p { margin-top: 4px; }

.cards { display: grid; gap: 16px; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); }
.cards.two { grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); }
.card {
    background: #fff;
    border: 1px solid #e5e7eb;
    border-radius: 12px;
    padding: 18px;
    box-shadow: 0 2px 6px rgba(0,0,0,0.04);
}
.card-title { font-size: 0.85em; font-weight: 600; display: flex; justify-content: space-between; }
.card-value { font-size: 1.8em; font-weight: 700; }

.badge {
    display: inline-block; font-size: 0.75em; padding: 2px 8px;
    border-radius: 999px; border: 1px solid #d1d5db; background: #f9fafb;
}
.priority-low { background: #e7f7ee; color: #15803d; border-color: #bbf7d0; }
.priority-medium { background: #fff7e0; color: #a16207; border-color: #fde68a; }
.priority-high { background: #fff0e6; color: #c2410c; border-color: #fed7aa; }
.priority-urgent { background: #fde8e8; color: #b91c1c; border-color: #fecaca; }

.task-section { display: grid; gap: 10px; margin-bottom: 24px; }
.task-section .count { color: #6b7280; font-weight: 400; }
.task-item {
    display: flex; gap: 14px; background: #fff;
    border: 1px solid #e5e7eb; border-radius: 12px; padding: 14px;
}
.task-item.completed { opacity: 0.6; }
.task-item.completed h3 { text-decoration: line-through; }
.task-item.dragging { outline: 2px dashed #0077ff; }
.task-body { flex: 1; display: grid; gap: 6px; }
.task-head { display: flex; justify-content: space-between; align-items: center; gap: 8px; }
.due { font-size: 0.8em; color: #6b7280; }
.due.overdue { color: #dc2626; font-weight: 600; }
.check { background: none; border: none; font-size: 1.3em; cursor: pointer; color: #1f2430; padding: 0; }

form { display: grid; gap: 8px; }
input[type=text], input[type=email], input[type=password], input[type=datetime-local], textarea {
    width: 100%; padding: 8px 10px; border: 1px solid #d1d5db; border-radius: 8px; font: inherit;
}
textarea { min-height: 70px; resize: none; }
button {
    padding: 8px 14px; border-radius: 8px; border: none;
    background: #0077ff; color: #fff; font-weight: 600; cursor: pointer;
}
button.danger { background: #fff; color: #dc2626; border: 1px solid #fecaca; justify-self: start; }
label.inline { display: inline-flex; align-items: center; gap: 4px; }
.priorities { display: flex; flex-wrap: wrap; gap: 10px; }
details summary { cursor: pointer; font-weight: 600; }
details.edit summary { font-size: 0.85em; color: #0077ff; font-weight: 500; }

.empty-state { padding: 28px; text-align: center; color: #6b7280; background: #fff; border-radius: 12px; border: 1px solid #e5e7eb; }
.error { color: #dc2626; }
.notice { color: #15803d; }

.calendar-layout { display: grid; gap: 24px; grid-template-columns: minmax(320px, 460px) 1fr; align-items: start; }
.month-nav { display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px; }
.month-nav a { font-size: 1.4em; padding: 0 10px; }
.month-grid { width: 100%; border-collapse: collapse; table-layout: fixed; }
.month-grid th { font-size: 0.75em; color: #6b7280; padding: 6px 0; }
.month-grid td { height: 52px; text-align: center; vertical-align: top; border-radius: 8px; }
.month-grid td a { display: block; padding-top: 8px; color: #1f2430; }
.month-grid td.today a { font-weight: 800; }
.month-grid td.selected { background: #0077ff; }
.month-grid td.selected a { color: #fff; }
.month-grid td.drop-target { background: #e8f1ff; }
.dots { display: flex; justify-content: center; gap: 3px; margin-top: 4px; }
.dot { display: inline-block; width: 7px; height: 7px; border-radius: 50%; border: none; }
.dot.priority-urgent { background: #dc2626; }
.dot.priority-high { background: #ea580c; }
.dot.priority-medium { background: #ca8a04; }
.dot.priority-low { background: #16a34a; }
.dot.other { background: #0077ff; }
.day-list { display: grid; gap: 12px; }

.class-grid, .task-week { width: 100%; border-collapse: separate; border-spacing: 4px; table-layout: fixed; }
.class-grid th { font-size: 0.85em; }
.class-grid th.slot { color: #6b7280; font-weight: 400; width: 90px; }
.class-grid td { height: 64px; background: #f3f4f6; border-radius: 8px; position: relative; vertical-align: top; }
.class-block {
    position: absolute; inset: 2px 2px auto 2px; z-index: 1;
    border-radius: 6px; padding: 6px; overflow: hidden; font-size: 0.8em;
    background: #e8f1ff;
}
.class-title { font-weight: 600; }
.class-block.blue { background: #dbeafe; }
.class-block.green { background: #dcfce7; }
.class-block.purple { background: #f3e8ff; }
.class-block.yellow { background: #fef9c3; }
.class-block.red { background: #fee2e2; }
.class-block.orange { background: #ffedd5; }
.class-block.teal { background: #ccfbf1; }
.class-block.indigo { background: #e0e7ff; }
.class-block.pink { background: #fce7f3; }
.class-block.cyan { background: #cffafe; }
.class-block.emerald { background: #d1fae5; }
.task-week td, .task-week th { text-align: left; vertical-align: top; padding: 6px; }
.task-week tr.quiet th { color: #9ca3af; }
.mini-task { display: flex; align-items: center; gap: 6px; font-size: 0.85em; padding: 4px 6px; background: #f3f4f6; border-radius: 6px; margin-bottom: 4px; }
.mini-task.completed span:nth-child(2) { text-decoration: line-through; opacity: 0.6; }

.option { display: grid; gap: 2px; padding: 8px 0; }
.summary { display: grid; grid-template-columns: 1fr auto; gap: 8px; }
.summary dd { font-weight: 600; }
.summary dd.priority-urgent { background: none; border: none; }

.auth { max-width: 380px; margin: 10vh auto; display: grid; gap: 12px; text-align: center; }
.auth form { text-align: left; }

@media (max-width: 900px) {
    .app { flex-direction: column; }
    .sidebar { width: 100%; }
    .calendar-layout { grid-template-columns: 1fr; }
}
"#;

const JAVASCRIPT: &str = r#"
// Drag a task onto a calendar day to move its deadline there
let draggedTaskId = null;

document.querySelectorAll('.task-item[draggable="true"]').forEach(item => {
    item.addEventListener('dragstart', event => {
        draggedTaskId = item.getAttribute('data-task-id');
        item.classList.add('dragging');
        event.dataTransfer.setData('text/plain', draggedTaskId);
    });
    item.addEventListener('dragend', () => {
        item.classList.remove('dragging');
        draggedTaskId = null;
    });
});

document.querySelectorAll('td.day[data-date]').forEach(cell => {
    cell.addEventListener('dragover', event => {
        event.preventDefault();
        cell.classList.add('drop-target');
    });
    cell.addEventListener('dragleave', () => cell.classList.remove('drop-target'));
    cell.addEventListener('drop', async event => {
        event.preventDefault();
        cell.classList.remove('drop-target');
        const taskId = event.dataTransfer.getData('text/plain') || draggedTaskId;
        if (!taskId) return;
        const date = cell.getAttribute('data-date');
        const response = await fetch(`/api/tasks/${taskId}/reschedule`, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ date }),
        });
        if (response.ok) {
            window.location.href = `/calendar?date=${date}`;
        }
    });
});
"#;
