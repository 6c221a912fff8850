use forkify::models::format_count;
use forkify::views::Region;
use forkify::{AppConfig, Event, Page, Session};
use log::{debug, warn};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  search <query>        search recipes
  page <n>              show page n of the results
  open <id> | #<id>     open a recipe
  inc | dec             one serving more / less
  add                   add the recipe's ingredients to the shopping list
  like                  like or unlike the open recipe
  remove <item-id>      remove a shopping list item
  count <item-id> <n>   change the count of a shopping list item
  show                  print everything
  help                  print this help
  quit                  leave";

enum Command {
    Event(Event),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(Command::Event(Event::Navigate(line.to_string())));
    }

    let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let event = match name {
        "search" | "s" => Event::Search(rest.to_string()),
        "page" | "p" => Event::GoToPage(
            rest.parse()
                .map_err(|_| format!("Not a page number: '{}'", rest))?,
        ),
        "open" | "o" => Event::Navigate(rest.to_string()),
        "inc" | "+" => Event::IncreaseServings,
        "dec" | "-" => Event::DecreaseServings,
        "add" => Event::AddToList,
        "like" => Event::ToggleLike,
        "remove" | "rm" => Event::DeleteItem(rest.to_string()),
        "count" => {
            let (id, value) = rest
                .split_once(' ')
                .ok_or_else(|| "Usage: count <item-id> <n>".to_string())?;
            let value = value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("Not a number: '{}'", value.trim()))?;
            Event::UpdateCount(id.to_string(), value)
        }
        "show" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "" => return Err(String::new()),
        other => return Err(format!("Unknown command '{}', try 'help'", other)),
    };
    Ok(Command::Event(event))
}

fn print_results(session: &Session, page: &Page) {
    let Some(search) = session.search() else {
        return;
    };
    println!("Results for '{}':", search.query);
    for fragment in page.fragments(Region::SearchResults) {
        let Some(id) = fragment.key.as_deref() else {
            continue;
        };
        if let Some(recipe) = search.recipes().iter().find(|r| r.id == id) {
            println!("  #{:<10} {} ({})", recipe.id, recipe.title, recipe.author);
        }
    }
    if search.recipes().is_empty() {
        println!("  (no recipes)");
    }
}

fn print_recipe(session: &Session) {
    let Some(recipe) = session.recipe() else {
        return;
    };
    let liked = session
        .likes()
        .map(|likes| likes.is_liked(&recipe.id))
        .unwrap_or(false);
    println!(
        "{}{} by {}",
        recipe.title,
        if liked { " ♥" } else { "" },
        recipe.author
    );
    println!("  {} minutes, {} servings", recipe.time, recipe.servings);
    for ingredient in &recipe.ingredients {
        let line = [
            format_count(ingredient.count),
            ingredient.unit.clone(),
            ingredient.ingredient.clone(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
        println!("  - {}", line);
    }
    if !recipe.url.is_empty() {
        println!("  Directions: {}", recipe.url);
    }
}

fn print_list(session: &Session) {
    let Some(list) = session.list() else {
        return;
    };
    println!("Shopping list:");
    for item in list.items() {
        println!(
            "  [{}] {} {} {}",
            item.id, item.count, item.unit, item.ingredient
        );
    }
}

fn print_likes(session: &Session) {
    let Some(likes) = session.likes() else {
        return;
    };
    println!("Liked recipes ({}):", likes.num_likes());
    for like in likes.likes() {
        println!("  #{:<10} {} ({})", like.id, like.title, like.author);
    }
}

fn print_for(event: &Event, session: &Session, page: &Page) {
    match event {
        Event::Search(_) | Event::GoToPage(_) => print_results(session, page),
        Event::Navigate(_) | Event::IncreaseServings | Event::DecreaseServings => {
            print_recipe(session)
        }
        Event::AddToList | Event::DeleteItem(_) | Event::UpdateCount(_, _) => print_list(session),
        Event::ToggleLike => print_likes(session),
        Event::Load(_) => {
            print_likes(session);
            print_recipe(session);
        }
    }
}

fn flush_page(config: &AppConfig, page: &mut Page) {
    for message in page.take_alerts() {
        eprintln!("! {}", message);
    }
    if let Some(path) = &config.output {
        if let Err(e) = fs::write(path, page.to_html()) {
            warn!("Failed to write page to {}: {}", path.display(), e);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    debug!("{:#?}", config);

    let mut session = Session::from_config(&config)?;
    let mut page = Page::new();

    // An optional argument is treated as the URL fragment the page was opened with
    let initial = env::args().nth(1).unwrap_or_default();
    let load = Event::Load(initial);
    session.dispatch(load.clone(), &mut page).await;
    print_for(&load, &session, &page);
    flush_page(&config, &mut page);

    println!("{}", HELP);
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(Command::Event(event)) => {
                session.dispatch(event.clone(), &mut page).await;
                print_for(&event, &session, &page);
                flush_page(&config, &mut page);
            }
            Ok(Command::Show) => {
                print_likes(&session);
                print_results(&session, &page);
                print_recipe(&session);
                print_list(&session);
            }
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(message) if message.is_empty() => {}
            Err(message) => eprintln!("{}", message),
        }
    }

    Ok(())
}
