//! Unread counts example.
//!
//! Prints the unread count of every category and the first page of unread
//! entry titles.
//!
//! Run with: `FEEDLY_ACCESS_TOKEN=your-token cargo run --example unread_counts`
//! Add `--sandbox` to talk to the developer sandbox, `--cache` to replay
//! responses from `./v3/...` files.

use feedly::{Client, Environment, GlobalResource, StreamOptions};

#[tokio::main]
async fn main() -> Result<(), feedly::Error> {
    let args: Vec<String> = std::env::args().collect();
    let env = if args.iter().any(|a| a == "--sandbox") {
        Environment::Sandbox
    } else {
        Environment::Cloud
    };

    // The token is read from FEEDLY_ACCESS_TOKEN.
    let client = Client::builder()
        .environment(env)
        .cache_enabled(args.iter().any(|a| a == "--cache"))
        .build()?;

    let profile = client.profile().get().await?;
    println!("Signed in as {} ({})", profile.full_name, profile.id);

    let counts = client.markers().counts().await?;
    for count in counts.unread_counts.iter().filter(|c| c.id.contains("/category/")) {
        println!("{:>6}  {}", count.count, count.id);
    }

    let page = client
        .streams()
        .contents(
            &GlobalResource::All.id(&profile.id),
            Some(&StreamOptions {
                count: 10,
                unread_only: true,
                ..Default::default()
            }),
        )
        .await?;
    for entry in &page.items {
        println!("- {}", entry.title);
    }

    println!(
        "Rate limit: {}/{} (resets at {:?})",
        page.rate.count, page.rate.limit, page.rate.reset
    );

    Ok(())
}
