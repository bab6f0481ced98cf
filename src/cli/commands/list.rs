use super::{open_store, parse_status_opt};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::interfaces::ClaimTransitions;
use crate::errors::AppResult;
use crate::models::claim::Claim;
use crate::utils::colors::{colorize_optional, colorize_status};
use crate::utils::date;
use crate::utils::formatting::{bold, short_id, truncate};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::List { status } => {
            let status = parse_status_opt(status)?;
            let store = open_store(cfg)?;
            let claims = store.list(status)?;

            if claims.is_empty() {
                println!("No claims found.");
                return Ok(());
            }

            print_table(&claims);
        }
        Commands::Show { id } => {
            let store = open_store(cfg)?;
            print_claim(&store.get(id)?);
        }
        _ => {}
    }
    Ok(())
}

fn print_table(claims: &[Claim]) {
    let mut table = Table::new(
        ["ID", "NAME", "EMAIL", "PAYPAL", "AMOUNT", "STATUS", "CLAIMED", "PROCESSED"]
            .into_iter()
            .map(Column::new)
            .collect(),
    );

    for c in claims {
        table.add_row(vec![
            short_id(&c.id).to_string(),
            truncate(&c.name, 24),
            c.identity.email.clone(),
            c.identity.paypal_email.clone(),
            c.amount_display(),
            colorize_status(c.status),
            date::display(&c.claimed_at),
            colorize_optional(&date::display_opt(c.processed_at.as_ref())),
        ]);
    }

    print!("{}", table.render());
    println!("{} claim(s)", claims.len());
}

pub fn print_claim(c: &Claim) {
    println!("{}", bold(&format!("Claim {}", c.id)));
    println!("  status     : {}", colorize_status(c.status));
    println!("  name       : {}", c.name);
    println!("  email      : {}", c.identity.email);
    println!("  paypal     : {}", c.identity.paypal_email);
    println!(
        "  phone      : {}",
        colorize_optional(c.phone.as_deref().unwrap_or(""))
    );
    println!("  country    : {}", c.country);
    println!("  visits     : {}", c.visit_count_at_claim);
    println!("  amount     : {}", c.amount_display());
    println!("  claimed    : {}", date::display(&c.claimed_at));
    println!(
        "  processed  : {}",
        colorize_optional(&date::display_opt(c.processed_at.as_ref()))
    );
    println!(
        "  notes      : {}",
        colorize_optional(c.admin_notes.as_deref().unwrap_or(""))
    );
}
