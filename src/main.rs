use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use london_roleplay::core::world::{ActionIntent, CharacterSeed, Game, PlayerSummary, Snapshot};
use london_roleplay::registry::{PlayerRecord, RosterRepository, ShopRegistry, SqliteRegistry};
use london_roleplay::rules::prosperity::prosperity;
use london_roleplay::simulation::settlement::stats_from_registry;
use london_roleplay::systems::assignment::AssignmentEventKind;
use london_roleplay::systems::economy::EconomicOutcome;

const USAGE: &str = "Commands: districts | players | create <name> <age|-> <gold|-> [mental] [physical] [undiff] | apply <player_id> <district_id> <role_id> | relocate <player_id> | raid <district_id> <rival_id> | shops <district_id> | open-shop <district_id> <name> | close-shop <shop_id> | stats <district_id> | sync | tick | quit";

fn main() {
    println!("Initializing London Roleplay (Rules Debug)...");
    let registry_path = parse_registry_path(env::args().collect());

    let registry = match open_registry(registry_path.as_deref()) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("Failed to open registry: {}", err);
            std::process::exit(1);
        }
    };

    let mut game = Game::new();

    println!("{}", USAGE);
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            break;
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => println!("{}", USAGE),
            "districts" => print_districts(&game),
            "players" => {
                let snapshot = game.tick(Vec::new());
                print_players(&snapshot.players);
            }
            "create" => {
                let name = parts.next();
                let age_raw = parts.next();
                let gold_raw = parts.next();
                let (Some(name), Some(age_raw), Some(gold_raw)) = (name, age_raw, gold_raw) else {
                    println!("Usage: create <name> <age|-> <gold|-> [mental] [physical] [undiff]");
                    continue;
                };
                let mental = parts.next().map(|s| s.to_string());
                let physical = parts.next().map(|s| s.to_string());
                let undifferentiated = parts.next() == Some("undiff");
                let seed = CharacterSeed {
                    name: name.to_string(),
                    age: parse_optional_number(age_raw),
                    gold: parse_optional_number(gold_raw),
                    mental_rank: mental,
                    physical_rank: physical,
                    undifferentiated,
                };
                let id = game.spawn_character(&seed);
                let snapshot = game.tick(Vec::new());
                if let Some(player) = snapshot.players.iter().find(|p| p.id == id) {
                    println!(
                        "Created #{} {} (age {}, gold {}, home {:?})",
                        player.id, player.name, player.age, player.gold, player.home
                    );
                }
            }
            "apply" => {
                let (Some(id_raw), Some(district_id), Some(role_id)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    println!("Usage: apply <player_id> <district_id> <role_id>");
                    continue;
                };
                let Ok(entity_id) = id_raw.parse::<u32>() else {
                    println!("Invalid player_id: {}", id_raw);
                    continue;
                };
                let snapshot = game.tick(vec![ActionIntent::ApplyForRole {
                    entity_id,
                    district_id: district_id.to_string(),
                    role_id: role_id.to_string(),
                }]);
                print_events(&snapshot);
            }
            "relocate" => {
                let Some(id_raw) = parts.next() else {
                    println!("Usage: relocate <player_id>");
                    continue;
                };
                let Ok(entity_id) = id_raw.parse::<u32>() else {
                    println!("Invalid player_id: {}", id_raw);
                    continue;
                };
                let snapshot = game.tick(vec![ActionIntent::Relocate { entity_id }]);
                if snapshot.assignments.is_empty() {
                    println!("No change.");
                } else {
                    print_events(&snapshot);
                }
            }
            "raid" => {
                let (Some(district_id), Some(rival_id)) = (parts.next(), parts.next()) else {
                    println!("Usage: raid <district_id> <rival_id>");
                    continue;
                };
                let snapshot = game.tick(vec![ActionIntent::EconomicAction {
                    district_id: district_id.to_string(),
                    rival_id: rival_id.to_string(),
                }]);
                print_events(&snapshot);
            }
            "shops" => {
                let Some(district_id) = parts.next() else {
                    println!("Usage: shops <district_id>");
                    continue;
                };
                match registry.shops_in_district(district_id) {
                    Ok(shops) if shops.is_empty() => println!("No open shops."),
                    Ok(shops) => {
                        for shop in shops {
                            println!(
                                "  #{} {} (owner {:?})",
                                shop.shop_id, shop.name, shop.owner_id
                            );
                        }
                    }
                    Err(err) => eprintln!("Registry error: {}", err),
                }
            }
            "open-shop" => {
                let (Some(district_id), Some(name)) = (parts.next(), parts.next()) else {
                    println!("Usage: open-shop <district_id> <name>");
                    continue;
                };
                match registry.register_shop(district_id, name, None) {
                    Ok(shop_id) => {
                        println!("Registered shop #{}", shop_id);
                        sync_shop_counts(&mut game, &registry);
                    }
                    Err(err) => eprintln!("Registry error: {}", err),
                }
            }
            "close-shop" => {
                let Some(id_raw) = parts.next() else {
                    println!("Usage: close-shop <shop_id>");
                    continue;
                };
                match id_raw.parse::<i64>() {
                    Ok(shop_id) => match registry.close_shop(shop_id) {
                        Ok(()) => sync_shop_counts(&mut game, &registry),
                        Err(err) => eprintln!("Registry error: {}", err),
                    },
                    Err(_) => println!("Invalid shop_id: {}", id_raw),
                }
            }
            "stats" => {
                let Some(district_id) = parts.next() else {
                    println!("Usage: stats <district_id>");
                    continue;
                };
                print_district_stats(&game, &registry, district_id);
            }
            "sync" => {
                sync_roster(&mut game, &registry);
                sync_shop_counts(&mut game, &registry);
                println!("Synced.");
            }
            "tick" => {
                let snapshot = game.tick(Vec::new());
                print_events(&snapshot);
            }
            _ => println!("Unknown command: {} (try 'help')", cmd),
        }
    }
}

fn parse_registry_path(args: Vec<String>) -> Option<PathBuf> {
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--db" {
            return iter.next().map(PathBuf::from);
        }
    }
    None
}

fn open_registry(
    path: Option<&std::path::Path>,
) -> Result<SqliteRegistry, Box<dyn std::error::Error>> {
    match path {
        Some(path) => SqliteRegistry::open(path),
        None => SqliteRegistry::open_in_memory(),
    }
}

fn parse_optional_number(raw: &str) -> Option<i64> {
    if raw == "-" {
        return None;
    }
    raw.parse::<i64>().ok()
}

fn print_districts(game: &Game) {
    let directory = game.district_directory();
    for district in &directory.catalog.districts {
        println!("{} ({})", district.name, district.id);
        if let Some(weights) = district.economy {
            println!(
                "  economy: resident x{}, shop x{}",
                weights.resident, weights.shop
            );
        }
        for role in &district.roles {
            let mut gates = Vec::new();
            if let Some(min) = role.min_mental {
                gates.push(format!("mental >= {}", min));
            }
            if let Some(min) = role.min_physical {
                gates.push(format!("physical >= {}", min));
            }
            if let Some(band) = role.age_band {
                gates.push(format!("age {}..{}", band.min, band.max));
            }
            println!("  {} ({}): {}", role.name, role.id, gates.join(", "));
        }
    }
}

fn print_players(players: &[PlayerSummary]) {
    if players.is_empty() {
        println!("No players.");
        return;
    }
    for player in players {
        println!(
            "#{} {} | age {} | gold {} | mental {} | physical {} | job {} | home {:?}",
            player.id,
            player.name,
            player.age,
            player.gold,
            player.mental_rank,
            player.physical_rank,
            player.job.as_deref().unwrap_or("-"),
            player.home,
        );
    }
}

fn print_events(snapshot: &Snapshot) {
    for event in &snapshot.assignments {
        match &event.kind {
            AssignmentEventKind::RoleGranted {
                district_id,
                role_id,
            } => {
                println!("#{}: granted {} in {}", event.entity_id, role_id, district_id);
            }
            AssignmentEventKind::RoleRefused {
                district_id,
                role_id,
                reason,
            } => {
                println!(
                    "#{}: refused {} in {} ({:?})",
                    event.entity_id, role_id, district_id, reason
                );
            }
            AssignmentEventKind::UnknownRole {
                district_id,
                role_id,
            } => {
                println!(
                    "#{}: no role {} in district {}",
                    event.entity_id, role_id, district_id
                );
            }
            AssignmentEventKind::HomeChanged { home } => {
                println!("#{}: moved to {:?}", event.entity_id, home);
            }
        }
    }
    for event in &snapshot.economy {
        match event.outcome {
            EconomicOutcome::Succeeded {
                prosperity,
                rival_prosperity,
            } => println!(
                "{} raided {} and won ({} vs {})",
                event.district_id, event.rival_id, prosperity, rival_prosperity
            ),
            EconomicOutcome::Repelled {
                prosperity,
                rival_prosperity,
            } => println!(
                "{} raided {} and was repelled ({} vs {})",
                event.district_id, event.rival_id, prosperity, rival_prosperity
            ),
            EconomicOutcome::NotEligible => println!(
                "{} cannot act against {}",
                event.district_id, event.rival_id
            ),
        }
    }
}

fn print_district_stats(game: &Game, registry: &SqliteRegistry, district_id: &str) {
    let directory = game.district_directory();
    let Some(district) = directory.catalog.district(district_id) else {
        println!("Unknown district: {}", district_id);
        return;
    };
    match stats_from_registry(registry, registry, district) {
        Ok(stats) => {
            println!("residents: {}, shops: {}", stats.residents, stats.shops);
            if let Some(weights) = district.economy {
                println!("prosperity: {}", prosperity(&stats, &weights));
            }
        }
        Err(err) => eprintln!("Registry error: {}", err),
    }
}

fn sync_roster(game: &mut Game, registry: &SqliteRegistry) {
    let snapshot = game.tick(Vec::new());
    for player in &snapshot.players {
        let record = PlayerRecord {
            player_id: player.id as i64,
            name: player.name.clone(),
            age: player.age,
            gold: player.gold,
            mental_rank: player.mental_rank.label().to_string(),
            physical_rank: player.physical_rank.label().to_string(),
            job: player.job.clone(),
            home: player.home,
            undifferentiated: player.undifferentiated,
        };
        if let Err(err) = registry.upsert_player(&record) {
            eprintln!("Failed to sync player #{}: {}", player.id, err);
        }
    }
}

fn sync_shop_counts(game: &mut Game, registry: &SqliteRegistry) {
    let district_ids: Vec<String> = game
        .district_directory()
        .catalog
        .districts
        .iter()
        .map(|district| district.id.clone())
        .collect();
    for district_id in district_ids {
        match registry.shop_count(&district_id) {
            Ok(count) => game.set_shop_count(&district_id, count),
            Err(err) => eprintln!("Failed to count shops in {}: {}", district_id, err),
        }
    }
}
