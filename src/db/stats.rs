use crate::db::pool::DbPool;
use crate::db::queries::count_by_status;
use crate::utils::colors::{CYAN, GREY, RESET, YELLOW, color_for_status};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) CLAIMS PER STATUS
    //
    let counts = count_by_status(&pool.conn)?;
    let total: i64 = counts.iter().map(|(_, n)| n).sum();

    println!("{}• Claims:{} {}", CYAN, RESET, total);
    for (status, n) in counts {
        println!(
            "    {}{:<9}{} {}",
            color_for_status(status),
            status.to_db_str(),
            RESET,
            n
        );
    }

    //
    // 3) CLAIM DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT claimed_at FROM claims ORDER BY claimed_at ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT claimed_at FROM claims ORDER BY claimed_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Claimed between:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
