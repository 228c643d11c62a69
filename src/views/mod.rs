use minijinja::{context, Environment};
use std::sync::OnceLock;

pub fn render_login() -> String {
    render("login.html", context! { title => "Reforger Panel — Login" })
}

pub fn render_dashboard() -> String {
    render(
        "dashboard.html",
        context! {
            title => "Reforger Panel",
            datetime => current_datetime(),
        },
    )
}

fn render(name: &str, context: minijinja::Value) -> String {
    template_env()
        .get_template(name)
        .and_then(|template| template.render(context))
        .unwrap_or_else(|err| format!("Template error: {err}"))
}

fn template_env() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir()));
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::Html);
        env
    })
}

fn templates_dir() -> String {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .to_string_lossy()
        .to_string()
}

fn current_datetime() -> String {
    let format = time::format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
        .unwrap_or_default();
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    now.format(&format).unwrap_or_else(|_| "n/a".to_string())
}
