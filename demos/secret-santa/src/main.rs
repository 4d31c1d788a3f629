//! Secret Santa Example
//!
//! An office gift exchange with two couples who must not draw each other,
//! a premium budget tier, and a late sign-up who joins by submitting a
//! wishlist. The draft is announced through the logging notifier, then
//! overridden once to show how a committed assignment is replaced.
//!
//! Configuration is read from `giftforge.toml` in the working directory
//! when present.

use chrono::NaiveDate;
use giftforge::prelude::*;
use giftforge::{console, ExchangeSummary, Result, TierShare};

fn main() {
    console::init();

    if let Err(err) = run() {
        eprintln!("\nExchange failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    println!("GiftForge Secret Santa Example");
    println!("==============================\n");

    let config = EngineConfig::load("giftforge.toml").unwrap_or_default();
    let manager = ExchangeManager::new();
    let exchange = GiftExchange::new(
        EventCode::parse("XMAS-2026")?,
        "Office Secret Santa",
        2000,
        config,
    )
    .with_description("Wrapped gifts under the tree by Friday noon");
    let exchange = match NaiveDate::from_ymd_opt(2026, 12, 18) {
        Some(date) => exchange.with_date(date),
        None => exchange,
    };
    let code = manager.insert(exchange)?;

    let people = manager.with_event(&code, |exchange| {
        let premium = exchange.add_tier("Premium", exchange.tiers().next_suggested_minimum())?;

        let mut ids = Vec::new();
        for (name, wish) in [
            ("Alice", "Board game"),
            ("Bob", "Hot sauce sampler"),
            ("Carol", "Sketchbook"),
            ("Dave", "Climbing chalk"),
            ("Erin", "Tea"),
            ("Frank", "Vinyl record"),
        ] {
            let request = NewParticipant::new(name, format!("{}@example.com", name.to_lowercase()))
                .with_wishlist([wish])
                .on_site(name != "Frank");
            ids.push(exchange.register(request)?);
        }

        // Late sign-up: joins pending, activates by submitting a wishlist.
        let grace = exchange.register(NewParticipant::new("Grace", "grace@example.com"))?;
        exchange.update_wishlist(grace, vec!["Houseplant".to_string()])?;
        ids.push(grace);

        exchange.set_tier(ids[4], Some(premium))?;

        // Couples never draw each other.
        exchange.add_exclusion(ids[0], ids[1])?;
        exchange.add_exclusion(ids[2], ids[3])?;
        Ok(ids)
    })?;

    manager.with_event(&code, |exchange| {
        println!("{} ({})", exchange.name(), code);
        if let Some(date) = exchange.date() {
            println!("Exchange on {}.", date.format("%A, %B %-d"));
        }
        if let Some(description) = exchange.description() {
            println!("{}", description);
        }
        Ok(())
    })?;
    println!("{} participants registered.\n", people.len());

    let draft = manager.shuffle(&code)?;
    manager.with_event(&code, |exchange| {
        print_assignments("Draft", exchange, &draft);
        Ok(())
    })?;

    let mut notifier = LoggingNotifier;
    let sent = manager.with_event(&code, |exchange| exchange.send_notifications(&mut notifier))?;
    println!("\n{} notices sent; assignment is now locked.", sent);

    match manager.shuffle(&code) {
        Err(GiftForgeError::AssignmentLocked(reason)) => {
            println!("Plain reshuffle refused: {}", reason)
        }
        other => println!("Unexpected reshuffle result: {:?}", other.map(|s| s.len())),
    }

    println!("\n--- Overriding the committed assignment ---\n");

    manager.with_event(&code, |exchange| {
        let revoked = exchange.shuffle_overriding_commit(&mut notifier)?;
        if let Some(revoked) = revoked {
            println!("Revoked {} earlier notices.", revoked.len());
        }
        if let Some(fresh) = exchange.state().assignments().cloned() {
            print_assignments("Replacement draft", exchange, &fresh);
        }
        exchange.send_notifications(&mut notifier)?;

        let reveal = exchange.reveal(people[0])?;
        println!(
            "\n{} opens their card: buy for {} (tier {}, at least {}), wishlist {:?}",
            reveal.giver_name,
            reveal.receiver_name,
            reveal.receiver_tier,
            format_money(reveal.receiver_minimum),
            reveal.receiver_wishlist
        );

        print_summary(&exchange.summary());
        print_tiers(&exchange.tier_distribution());
        if let Some(days) = exchange.days_until(chrono::Local::now().date_naive()) {
            println!("  Days to go:      {}", days);
        }
        Ok(())
    })?;
    Ok(())
}

fn print_assignments(title: &str, exchange: &GiftExchange, set: &AssignmentSet) {
    println!("{}:", title);
    for edge in set.iter() {
        let name = |id| {
            exchange
                .registry()
                .get(id)
                .map(|p| p.name.as_str())
                .unwrap_or("?")
        };
        println!("  {:<6} -> {}", name(edge.giver), name(edge.receiver));
    }
}

fn print_summary(summary: &ExchangeSummary) {
    println!("\nSummary:");
    println!("  Participants:    {}", summary.total);
    println!("  Active:          {}", summary.active);
    println!("  Wishlists:       {}", summary.wishlists_submitted);
    println!("  Exclusions:      {}", summary.exclusions);
    println!("  Tiers:           {}", summary.tiers);
    println!("  State:           {}", summary.state);
}

fn print_tiers(tiers: &[TierShare]) {
    println!("\nBudget tiers:");
    for share in tiers {
        println!(
            "  {:<10} {:>8} min  {} participants",
            share.name,
            format_money(share.minimum),
            share.participants
        );
    }
}

fn format_money(minor_units: u64) -> String {
    format!("${}.{:02}", minor_units / 100, minor_units % 100)
}
