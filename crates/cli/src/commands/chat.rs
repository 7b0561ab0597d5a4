//! AI chat, one-shot or interactive.

use std::io::Write as _;

use hulara_core::ProductId;

use super::CliError;

/// Chat with the assistant. With a message argument, send it and print
/// the reply; otherwise start the interactive loop (`clear` resets the
/// conversation, `exit` or EOF ends it). With `--product`, the product's
/// details ride along as conversation context.
///
/// Provider failures come back as reply text, so a flaky key never kills
/// the loop.
pub async fn run(message: Option<&str>, product: Option<ProductId>) -> Result<(), CliError> {
    let mut session = super::session().await?;

    let context = match product {
        Some(id) => {
            let product = session
                .fetcher()
                .product(id)
                .await
                .map_err(|e| CliError::Invalid(e.to_string()))?;
            Some(format!(
                "The conversation is about this product: {} (SKU {}), price {}, stock {}.",
                product.name,
                product.sku,
                product.price,
                product
                    .stock_quantity
                    .map_or_else(|| "unmanaged".to_string(), |q| q.to_string()),
            ))
        }
        None => None,
    };

    let Some(chat) = session.chat() else {
        return Err(CliError::Invalid(
            "No AI API key configured; log in with --ai-api-key to enable chat".to_string(),
        ));
    };
    chat.set_context(context);

    if let Some(message) = message {
        let reply = chat.send(message).await;
        println!("{reply}");
        return Ok(());
    }

    println!(
        "Chatting via {} (exit to quit, clear to reset)",
        chat.provider().name()
    );

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => {}
            "exit" | "quit" => break,
            "clear" => {
                chat.clear();
                println!("Conversation cleared");
            }
            message => {
                let reply = chat.send(message).await;
                println!("{reply}");
            }
        }
    }

    Ok(())
}
