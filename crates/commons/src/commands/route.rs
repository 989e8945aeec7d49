//! `commons route`: resolve a path through the guarded router.

use owo_colors::Style;
use serde::Serialize;
use tabled::Tabled;

use commons_core::router::Route;
use commons_core::{App, Navigation};

use crate::cli::{GlobalOpts, RouteArgs};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RouteEntry {
    name: &'static str,
    path: &'static str,
    view: String,
    requires_auth: bool,
}

impl From<&Route> for RouteEntry {
    fn from(r: &Route) -> Self {
        Self {
            name: r.name,
            path: r.path,
            view: r.view.to_string(),
            requires_auth: r.requires_auth,
        }
    }
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "View")]
    view: String,
    #[tabled(rename = "Sign-in")]
    requires_auth: &'static str,
}

impl From<&RouteEntry> for RouteRow {
    fn from(r: &RouteEntry) -> Self {
        Self {
            name: r.name,
            path: r.path,
            view: r.view.clone(),
            requires_auth: if r.requires_auth { "required" } else { "" },
        }
    }
}

fn navigation_detail(nav: &Navigation, color: bool) -> String {
    let route = nav.route();
    let outcome = match nav {
        Navigation::Proceed(_) => output::paint("proceed", Style::new().green(), color),
        Navigation::Redirect { from, .. } => output::paint(
            &format!("redirected from {from} (sign-in required)"),
            Style::new().yellow(),
            color,
        ),
    };
    let params = route
        .params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ");

    output::detail_lines(&[
        ("Outcome", Some(outcome)),
        ("Route", Some(route.name.to_owned())),
        ("View", Some(route.view.to_string())),
        ("Path", Some(route.path.clone())),
        ("Params", (!params.is_empty()).then_some(params)),
    ])
}

pub async fn handle(app: &App, args: RouteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let router = app.router();

    let Some(path) = args.path else {
        let entries: Vec<RouteEntry> = router.table().routes().iter().map(RouteEntry::from).collect();
        let out = output::render_list(
            global.output,
            &entries,
            |e| RouteRow::from(e),
            |e| e.path.to_owned(),
        )?;
        output::print_output(&out, global.quiet)?;
        return Ok(());
    };

    let nav = router.navigate(&path).await?;
    let color = output::should_color(global.color);
    let out = output::render_single(
        global.output,
        &nav,
        |n| navigation_detail(n, color),
        |n| n.route().name.to_owned(),
    )?;
    output::print_output(&out, global.quiet)?;
    Ok(())
}
