use shopfront_client::WishlistStore;

use super::WishlistCommands;
use crate::context::{api_failure, fmt_money, truncate, App};

pub(crate) async fn run_wishlist(app: &App, command: WishlistCommands) -> anyhow::Result<()> {
    app.require_session()?;
    let mut wishlist = WishlistStore::new(app.client.clone());
    wishlist.load().await;

    match command {
        WishlistCommands::List => {}
        WishlistCommands::Add { product } => {
            wishlist
                .add(&product)
                .await
                .map_err(|e| api_failure("add to wishlist", e))?;
            println!("saved {product}");
        }
        WishlistCommands::Remove { product } => {
            wishlist
                .remove(&product)
                .await
                .map_err(|e| api_failure("remove from wishlist", e))?;
            println!("removed {product}");
        }
        WishlistCommands::Toggle { product } => {
            let saved = wishlist
                .toggle(&product)
                .await
                .map_err(|e| api_failure("update wishlist", e))?;
            if saved {
                println!("saved {product}");
            } else {
                println!("removed {product}");
            }
        }
        WishlistCommands::Clear => {
            if !app.confirm("Remove every product from your wishlist?")? {
                println!("aborted");
                return Ok(());
            }
            wishlist
                .clear()
                .await
                .map_err(|e| api_failure("clear wishlist", e))?;
        }
    }

    if wishlist.count() == 0 {
        println!("your wishlist is empty");
        return Ok(());
    }
    println!("{:<26}{:<30}{:>12}", "ID", "PRODUCT", "PRICE");
    for p in wishlist.products() {
        println!(
            "{:<26}{:<30}{:>12}",
            p.id,
            truncate(&p.name, 27),
            fmt_money(p.effective_price())
        );
    }
    println!();
    println!("{} saved", wishlist.count());
    Ok(())
}
