use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::session::{Dashboard, Menu, Notice, PendingAction, PendingConfirmation};
use crate::types::{Assignment, AssignmentDraft, Course};
use crate::views::{self, CourseFilter, EMPTY_PLACEHOLDER};

fn page(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Scadenzario" }
                style { (PreEscaped(CSS)) }
            }
            body { (body) }
        }
    }
}

/// Name-capture form shown while logged out
pub fn render_login_page() -> Markup {
    page(html! {
        div.login {
            h1 { "Login" }
            form method="post" action="/login" {
                input type="text" name="username" placeholder="Enter username" autofocus;
                br;
                button type="submit" { "Login" }
            }
        }
    })
}

pub fn render_dashboard(dashboard: &Dashboard, today: &str) -> Markup {
    let view = &dashboard.view;

    page(html! {
        div.layout {
            nav.sidebar {
                h3 { "Menu" }
                @for menu in Menu::ALL {
                    form method="post" action={"/menu/" (menu.slug())} {
                        button.menu-button.active[menu == view.active_menu] type="submit" {
                            (menu.label())
                        }
                    }
                }
                form.logout method="post" action="/logout" {
                    button type="submit" { "Log out" }
                }
            }
            main.content {
                h2 { "Welcome, " (dashboard.username) "!" }
                @if let Some(notice) = &view.notice {
                    (render_notice(notice))
                }
                section.panel id=(view.active_menu.slug()) {
                    h3 { (view.active_menu.label()) }
                    @match view.active_menu {
                        Menu::Upcoming => {
                            (render_list(&views::upcoming(&dashboard.store), dashboard, today))
                        }
                        Menu::Course => { (render_course_panel(dashboard, today)) }
                        Menu::Completed => {
                            (render_list(&views::completed(&dashboard.store), dashboard, today))
                        }
                        Menu::Add => { (render_add_form(&view.add_draft)) }
                    }
                }
            }
        }
        @if let Some(pending) = &view.pending {
            (render_confirmation(pending, dashboard))
        }
    })
}

fn render_notice(notice: &Notice) -> Markup {
    match notice {
        Notice::Info(text) => html! { div.notice.info { (text) } },
        Notice::Error(text) => html! { div.notice.error role="alert" { (text) } },
    }
}

fn render_course_panel(dashboard: &Dashboard, today: &str) -> Markup {
    let selected = dashboard.view.selected_course;
    let groups = views::by_course(&dashboard.store, selected);
    let filters = std::iter::once(CourseFilter::All).chain(Course::ALL.map(CourseFilter::Only));

    html! {
        form.course-filter method="post" action="/course" {
            label for="course-select" { "Course: " }
            select #"course-select" name="course" onchange="this.form.submit()" {
                @for filter in filters {
                    option value=(filter.value()) selected[filter == selected] {
                        (filter.value())
                    }
                }
            }
            noscript { button type="submit" { "Filter" } }
        }
        @if groups.is_empty() {
            p.empty-state { (EMPTY_PLACEHOLDER) }
        } @else {
            @for (course, items) in &groups {
                div.course-group {
                    h4 { (course.as_str()) }
                    (render_list(items, dashboard, today))
                }
            }
        }
    }
}

fn render_list(items: &[&Assignment], dashboard: &Dashboard, today: &str) -> Markup {
    let editing = dashboard.view.editing.as_ref();

    html! {
        @if items.is_empty() {
            p.empty-state { (EMPTY_PLACEHOLDER) }
        } @else {
            ul.assignment-list {
                @for item in items {
                    @match editing.filter(|e| e.id == item.id) {
                        Some(session) => {
                            li.assignment.editing { (render_edit_form(&session.draft)) }
                        }
                        None => { (render_item(item, today)) }
                    }
                }
            }
        }
    }
}

fn render_item(item: &Assignment, today: &str) -> Markup {
    let overdue = views::is_overdue(item, today);

    html! {
        li.assignment.overdue[overdue].completed[item.completed] data-id=(item.id.to_string()) {
            div.assignment-details {
                strong.assignment-name { (item.name) }
                span.assignment-course { (item.course.as_str()) }
                span.assignment-due {
                    "Due " (item.due_date)
                    @if overdue {
                        span.overdue-tag { "Overdue" }
                    }
                }
            }
            div.actions {
                @if !item.completed {
                    form method="post" action={"/assignments/" (item.id.to_string()) "/complete"} {
                        button type="submit" { "Mark Completed" }
                    }
                }
                form method="post" action={"/assignments/" (item.id.to_string()) "/edit"} {
                    button type="submit" { "Edit" }
                }
                form method="post" action={"/assignments/" (item.id.to_string()) "/delete"} {
                    button.danger type="submit" { "Delete" }
                }
            }
        }
    }
}

fn course_select(current: &str) -> Markup {
    html! {
        select name="course" {
            option value="" selected[current.is_empty()] { "Select course" }
            @for course in Course::ALL {
                @let chosen = course.as_str().eq_ignore_ascii_case(current.trim());
                option value=(course.as_str()) selected[chosen] { (course.as_str()) }
            }
        }
    }
}

fn draft_fields(draft: &AssignmentDraft) -> Markup {
    html! {
        input type="text" name="name" placeholder="Assignment name" value=(draft.name);
        (course_select(&draft.course))
        input type="date" name="due_date" value=(draft.due_date);
    }
}

fn render_add_form(draft: &AssignmentDraft) -> Markup {
    html! {
        form.assignment-form method="post" action="/assignments" {
            (draft_fields(draft))
            div.form-buttons {
                button type="submit" { "Save" }
                button type="submit" formaction="/add/cancel" { "Cancel" }
            }
        }
    }
}

fn render_edit_form(draft: &AssignmentDraft) -> Markup {
    html! {
        form.assignment-form method="post" action="/edit/save" {
            (draft_fields(draft))
            div.form-buttons {
                button type="submit" { "Save" }
                button type="submit" formaction="/edit/cancel" { "Cancel" }
            }
        }
    }
}

fn render_confirmation(pending: &PendingConfirmation, dashboard: &Dashboard) -> Markup {
    let target = match pending.action {
        PendingAction::Delete(id) | PendingAction::Complete(id) => dashboard.store.get(id),
    };

    html! {
        div.modal-backdrop {
            div.modal role="dialog" aria-modal="true" {
                p.modal-message { (pending.message()) }
                @if let Some(assignment) = target {
                    p.modal-target {
                        (assignment.name) " (" (assignment.course.as_str()) ", due "
                        (assignment.due_date) ")"
                    }
                }
                div.form-buttons {
                    form method="post" action="/confirm" {
                        button.danger type="submit" autofocus { "OK" }
                    }
                    form method="post" action="/dismiss" {
                        button type="submit" { "Cancel" }
                    }
                }
            }
        }
    }
}

const CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    color: #222;
    line-height: 1.4;
}

button {
    padding: 6px 12px;
    cursor: pointer;
}

button.danger {
    color: #b00020;
}

.login {
    padding: 2rem;
    text-align: center;
}

.login input {
    margin: 1rem 0;
    padding: 6px;
}

.layout {
    display: flex;
    min-height: 100vh;
}

.sidebar {
    width: 200px;
    background: #f0f0f0;
    padding: 1rem;
}

.sidebar form {
    margin-top: 1rem;
}

.menu-button.active {
    font-weight: 700;
}

.content {
    flex: 1;
    padding: 2rem;
}

.content h2 {
    margin-bottom: 1rem;
}

.panel h3 {
    margin-bottom: 1rem;
}

.notice {
    padding: 8px 12px;
    margin-bottom: 1rem;
    border-radius: 4px;
}

.notice.info {
    background: #e7f5e9;
}

.notice.error {
    background: #fdecea;
    color: #b00020;
}

.assignment-list {
    list-style: none;
}

.assignment {
    display: flex;
    justify-content: space-between;
    gap: 1rem;
    padding: 10px;
    margin-bottom: 8px;
    border: 1px solid #ddd;
}

.assignment.overdue {
    border-color: #b00020;
    background: #fff5f5;
}

.assignment.completed .assignment-name {
    text-decoration: line-through;
}

.assignment-details span {
    margin-left: 12px;
    color: #555;
}

.overdue-tag {
    color: #b00020;
    font-weight: 700;
}

.actions {
    display: flex;
    gap: 6px;
}

.course-group {
    margin-bottom: 1.5rem;
}

.course-filter {
    margin-bottom: 1rem;
}

.assignment-form {
    display: flex;
    flex-direction: column;
    gap: 8px;
    max-width: 320px;
}

.assignment-form input,
.assignment-form select {
    padding: 6px;
}

.form-buttons {
    display: flex;
    gap: 8px;
}

.empty-state {
    color: #666;
}

.modal-backdrop {
    position: fixed;
    inset: 0;
    background: rgba(0,0,0,0.4);
    display: flex;
    align-items: center;
    justify-content: center;
}

.modal {
    background: #fff;
    padding: 1.5rem;
    border-radius: 6px;
    display: grid;
    gap: 1rem;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Action;
    use crate::types::AssignmentId;

    fn dashboard_with(items: &[(&str, &str, &str)]) -> (Dashboard, Vec<AssignmentId>) {
        let mut dashboard = Dashboard::new("Ada".to_string());
        let ids = items
            .iter()
            .map(|(name, course, due)| {
                dashboard
                    .store
                    .add(&AssignmentDraft::new(name, course, due))
                    .unwrap()
            })
            .collect();
        (dashboard, ids)
    }

    #[test]
    fn test_login_page_has_form() {
        let page = render_login_page().into_string();
        assert!(page.contains("action=\"/login\""));
        assert!(page.contains("name=\"username\""));
    }

    #[test]
    fn test_dashboard_greets_user_and_lists_menus() {
        let (dashboard, _) = dashboard_with(&[]);
        let page = render_dashboard(&dashboard, "2024-06-01").into_string();

        assert!(page.contains("Welcome, Ada!"));
        for menu in Menu::ALL {
            assert!(page.contains(menu.label()));
            assert!(page.contains(&format!("action=\"/menu/{}\"", menu.slug())));
        }
    }

    #[test]
    fn test_empty_panel_shows_placeholder() {
        let (dashboard, _) = dashboard_with(&[]);
        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_overdue_item_highlighted() {
        let (dashboard, _) = dashboard_with(&[("Essay", "English", "2024-01-01")]);
        let page = render_dashboard(&dashboard, "2024-06-01").into_string();

        assert!(page.contains("Essay"));
        assert!(page.contains("Overdue"));
        assert!(page.contains("assignment overdue"));
    }

    #[test]
    fn test_future_item_not_highlighted() {
        let (dashboard, _) = dashboard_with(&[("Essay", "English", "2024-12-01")]);
        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(!page.contains("Overdue"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let (dashboard, _) = dashboard_with(&[("<script>alert(1)</script>", "Math", "2024-12-01")]);
        let page = render_dashboard(&dashboard, "2024-06-01").into_string();

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_course_panel_filters_groups() {
        let (mut dashboard, _) = dashboard_with(&[
            ("Algebra", "Math", "2024-12-01"),
            ("Cells", "Science", "2024-12-02"),
        ]);
        dashboard.apply(Action::SelectMenu(Menu::Course));
        dashboard.apply(Action::SelectCourse(CourseFilter::Only(Course::Math)));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains("Algebra"));
        assert!(!page.contains("Cells"));
        assert!(page.contains("<option value=\"Math\" selected>"));
    }

    #[test]
    fn test_course_panel_empty_selection() {
        let (mut dashboard, _) = dashboard_with(&[("Algebra", "Math", "2024-12-01")]);
        dashboard.apply(Action::SelectMenu(Menu::Course));
        dashboard.apply(Action::SelectCourse(CourseFilter::Only(Course::History)));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_edit_form_prefilled() {
        let (mut dashboard, ids) = dashboard_with(&[("Essay", "English", "2024-12-01")]);
        dashboard.apply(Action::BeginEdit(ids[0]));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains("action=\"/edit/save\""));
        assert!(page.contains("value=\"Essay\""));
        assert!(page.contains("value=\"2024-12-01\""));
        assert!(page.contains("<option value=\"English\" selected>"));
        assert!(page.contains("formaction=\"/edit/cancel\""));
    }

    #[test]
    fn test_completed_item_has_no_complete_button() {
        let (mut dashboard, ids) = dashboard_with(&[("Essay", "English", "2024-01-01")]);
        dashboard.store.mark_completed(ids[0]).unwrap();
        dashboard.apply(Action::SelectMenu(Menu::Completed));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains("Essay"));
        assert!(!page.contains(&format!("/assignments/{}/complete", ids[0])));
        assert!(page.contains(&format!("/assignments/{}/delete", ids[0])));
        assert!(!page.contains("Overdue"));
    }

    #[test]
    fn test_open_item_has_complete_button() {
        let (dashboard, ids) = dashboard_with(&[("Essay", "English", "2024-12-01")]);
        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains(&format!("action=\"/assignments/{}/complete\"", ids[0])));
    }

    #[test]
    fn test_course_filter_options() {
        let (mut dashboard, _) = dashboard_with(&[]);
        dashboard.apply(Action::SelectMenu(Menu::Course));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains("<option value=\"All\" selected>All</option>"));
        for course in Course::ALL {
            let option = format!("<option value=\"{0}\">{0}</option>", course.as_str());
            assert!(page.contains(&option));
        }
    }

    #[test]
    fn test_add_form_cancel_posts_to_server() {
        let (mut dashboard, _) = dashboard_with(&[]);
        dashboard.apply(Action::SelectMenu(Menu::Add));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains("formaction=\"/add/cancel\""));
        assert!(!page.contains("type=\"reset\""));
    }

    #[test]
    fn test_confirmation_dialog_rendered() {
        let (mut dashboard, ids) = dashboard_with(&[("Essay", "English", "2024-12-01")]);
        dashboard.apply(Action::RequestDelete(ids[0]));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains("Are you sure you want to delete this assignment?"));
        assert!(page.contains("action=\"/confirm\""));
        assert!(page.contains("action=\"/dismiss\""));
    }

    #[test]
    fn test_add_form_keeps_rejected_input() {
        let (mut dashboard, _) = dashboard_with(&[]);
        dashboard.apply(Action::SelectMenu(Menu::Add));
        dashboard.apply(Action::Add(AssignmentDraft::new("Poster", "Science", "")));

        let page = render_dashboard(&dashboard, "2024-06-01").into_string();
        assert!(page.contains("value=\"Poster\""));
        assert!(page.contains("<option value=\"Science\" selected>"));
        assert!(page.contains("The due date field is required"));
    }
}
