use replance_lib::lead::SubmitOutcome;
use replance_lib::pricing::{PLANS, SAVINGS_NOTE};
use replance_lib::{BillingPeriod, DemoView, Plan};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
    Html,
}

#[derive(Tabled, Serialize)]
struct PlanRow {
    #[tabled(rename = "Plan")]
    #[serde(rename = "Plan")]
    title: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Features")]
    #[serde(rename = "Features")]
    features: String,
}

#[derive(Serialize)]
struct PlanJson<'a> {
    title: &'a str,
    billing: BillingPeriod,
    price: u32,
    features: &'a [&'a str],
}

#[derive(Serialize)]
struct LeadJson<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_text: Option<&'a str>,
}

// -- Row builders --

fn build_plan_rows(plans: &[Plan], period: BillingPeriod, separator: &str) -> Vec<PlanRow> {
    plans
        .iter()
        .map(|p| PlanRow {
            title: p.title.to_string(),
            price: p.price_label(period),
            features: p.features.join(separator),
        })
        .collect()
}

// -- Demo --

pub fn print_demo(view: &DemoView, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(view),
        _ => print!("{}", demo_text(view, format)),
    }
}

fn demo_text(view: &DemoView, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Markdown => view.render_markdown(),
        OutputFormat::Html => view.render_html(),
        OutputFormat::Table | OutputFormat::Json => view.render_text(),
    }
}

// -- Pricing --

fn pricing_table(period: BillingPeriod) -> String {
    Table::new(build_plan_rows(PLANS, period, "\n")).to_string()
}

fn pricing_markdown(period: BillingPeriod) -> String {
    let mut table = Table::new(build_plan_rows(PLANS, period, ", "));
    table.with(Style::markdown());
    table.to_string()
}

fn pricing_html(period: BillingPeriod) -> String {
    let mut out = String::from("<section class=\"pricing\">\n");
    for plan in PLANS {
        out.push_str(&format!(
            "<div class=\"plan\">\n<h3>{}</h3>\n<p>{}</p>\n<ul>\n",
            plan.title,
            plan.price_label(period)
        ));
        for feature in plan.features {
            out.push_str(&format!("<li>{}</li>\n", feature.replace('&', "&amp;")));
        }
        out.push_str("</ul>\n</div>\n");
    }
    out.push_str("</section>\n");
    out
}

pub fn print_pricing(period: BillingPeriod, format: &OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("Billed {} ({})", period, SAVINGS_NOTE);
            println!("{}", pricing_table(period));
        }
        OutputFormat::Markdown => println!("{}", pricing_markdown(period)),
        OutputFormat::Html => print!("{}", pricing_html(period)),
        OutputFormat::Json => {
            let plans: Vec<PlanJson> = PLANS
                .iter()
                .map(|p| PlanJson {
                    title: p.title,
                    billing: period,
                    price: p.price(period),
                    features: p.features,
                })
                .collect();
            print_json(&plans);
        }
    }
}

// -- Lead form --

fn lead_text(outcome: &SubmitOutcome) -> String {
    let mut out = format!("{}\n", outcome.message());
    if let Some(text) = outcome.generated_text() {
        out.push_str("\nGenerated Message:\n");
        out.push_str(text);
        out.push('\n');
    }
    out
}

pub fn print_lead_outcome(outcome: &SubmitOutcome, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&LeadJson {
            success: outcome.is_success(),
            message: outcome.message(),
            generated_text: outcome.generated_text(),
        }),
        _ => print!("{}", lead_text(outcome)),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
