use crate::session::commands::MENU;
use crate::session::{Command, Session};
use colored::*;
use price_fetcher::{Discount, PriceSource};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

const DISCOUNT_PROMPT: &str = "New discount factor (decimal from 0 to 1, default is 1): ";

/// Menu loop over a pricing session
///
/// Reads commands from `input` until `q` or end of input, writing the
/// transcript to `output`.
pub struct InteractiveCLI<S: PriceSource, R: BufRead, W: Write> {
    session: Session<S>,
    input: R,
    output: W,
}

impl<S: PriceSource, R: BufRead, W: Write> InteractiveCLI<S, R, W> {
    pub fn new(session: Session<S>, input: R, output: W) -> Self {
        Self { session, input, output }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub async fn run(&mut self) -> io::Result<()> {
        write!(self.output, "\n{}\n\n> ", MENU)?;
        self.output.flush()?;

        while let Some(line) = self.read_line()? {
            let command = Command::parse(&line);
            debug!("Command: {:?}", command);

            match command {
                Command::Quit => break,
                Command::Price => self.price_flow().await?,
                Command::List => self.list_products()?,
                Command::All => self.price_all().await?,
                Command::Discount => {
                    if !self.discount_flow()? {
                        break;
                    }
                }
                Command::Help => writeln!(self.output, "\n{}", MENU)?,
                Command::Unknown(_) => {}
            }

            write!(self.output, "\n> ")?;
            self.output.flush()?;
        }

        writeln!(self.output, "\n{}", "👋 Goodbye!".cyan())?;
        self.output.flush()
    }

    /// Next input line without its line ending; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    async fn price_flow(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Product name: ")? else {
            return Ok(());
        };

        if let Some(price) = self.session.price_of(&name).await {
            writeln!(self.output, "\n{}", paint(&price))?;
        }
        Ok(())
    }

    fn list_products(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        for name in self.session.catalog().names() {
            writeln!(self.output, "{}", name)?;
        }
        Ok(())
    }

    /// Price every product in catalog order, one request at a time.
    /// Each line is flushed as soon as its lookup finishes; a failure never stops the rest.
    async fn price_all(&mut self) -> io::Result<()> {
        let Self { session, output, .. } = self;
        info!("Pricing all {} products", session.catalog().len());

        writeln!(output)?;
        for (name, product_id) in session.catalog().iter() {
            let price = session.price_for_id(product_id).await;
            writeln!(output, "{}: {}", name, paint(&price))?;
            output.flush()?;
        }
        Ok(())
    }

    /// Ask for a discount until a number is given. Returns `false` if input ran out.
    fn discount_flow(&mut self) -> io::Result<bool> {
        loop {
            let Some(answer) = self.prompt(DISCOUNT_PROMPT)? else {
                return Ok(false);
            };

            match answer.parse::<Discount>() {
                Ok(discount) => {
                    self.session.set_discount(discount);
                    return Ok(true);
                }
                Err(e) => {
                    writeln!(self.output, "{}", format!("❌ Invalid discount factor: {}", e).red())?
                }
            }
        }
    }
}

/// Errors in red, everything else as-is
fn paint(text: &str) -> ColoredString {
    if text.starts_with("Error: ") {
        text.red()
    } else if text.starts_with('$') {
        text.normal()
    } else {
        text.yellow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::tests::FakeVendor;
    use async_trait::async_trait;
    use price_fetcher::{quote_from_body, Catalog, FetchResult, PriceQuote};
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    async fn transcript(catalog: &str, vendor: FakeVendor, script: &str) -> (String, Discount) {
        colored::control::set_override(false);

        let session = Session::new(Catalog::parse(catalog).unwrap(), vendor, Discount::NONE);
        let mut output = Vec::new();
        let discount = {
            let mut cli = InteractiveCLI::new(session, Cursor::new(script.to_string()), &mut output);
            cli.run().await.unwrap();
            cli.session().discount()
        };
        (String::from_utf8(output).unwrap(), discount)
    }

    #[tokio::test]
    async fn test_list_then_price_then_quit() {
        let vendor = FakeVendor::default().with_price("1000112108", 45.0);
        let (out, _) = transcript("Hammer,1000112108\n", vendor, "l\np\nHammer\nq\n").await;

        assert!(out.starts_with("\nChoose an option:\n    p: get the price of a product"));
        assert!(out.contains("> \nHammer\n\n> "));
        assert!(out.contains("Product name: \n$45.0\n\n> "));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_price_all_reports_every_product() {
        let vendor = FakeVendor::default().with_price("1000112108", 45.0);
        let (out, _) =
            transcript("Hammer,1000112108\nMystery,42\n", vendor, "a\nq\n").await;

        assert!(out.contains(
            "\nHammer: $45.0\nMystery: The ID associated with that product (42) is not valid!\n"
        ));
    }

    /// Output sink that stays readable while the menu loop owns it
    #[derive(Clone, Default)]
    struct SharedOutput(Arc<Mutex<Vec<u8>>>);

    impl SharedOutput {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Vendor that records the transcript as it stood when each lookup began
    struct WatchingVendor {
        output: SharedOutput,
        seen: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl PriceSource for WatchingVendor {
        async fn fetch_price(&self, product_id: &str, discount: Discount) -> FetchResult<PriceQuote> {
            self.seen.lock().unwrap().push((product_id.to_string(), self.output.text()));
            let body = r#"{"optimizedPrice":{"displayPrice":{"value":12.5}}}"#;
            quote_from_body(product_id, body.as_bytes(), discount)
        }
    }

    #[tokio::test]
    async fn test_price_all_writes_each_line_before_next_lookup() {
        colored::control::set_override(false);

        let output = SharedOutput::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let vendor = WatchingVendor { output: output.clone(), seen: Arc::clone(&seen) };
        let session =
            Session::new(Catalog::parse("Anchor,1\nBracket,2\nClamp,3\n").unwrap(), vendor, Discount::NONE);

        let mut cli = InteractiveCLI::new(session, Cursor::new("a\nq\n".to_string()), output.clone());
        cli.run().await.unwrap();

        let seen = seen.lock().unwrap();
        let ids: Vec<&str> = seen.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        assert!(!seen[0].1.contains("Anchor: "));
        assert!(seen[1].1.ends_with("\nAnchor: $12.5\n"));
        assert!(seen[2].1.ends_with("\nAnchor: $12.5\nBracket: $12.5\n"));
        assert!(output.text().contains("Clamp: $12.5\n"));
    }

    #[tokio::test]
    async fn test_padded_command_is_accepted() {
        let (out, _) = transcript("Hammer,1", FakeVendor::default(), "  l \t\nq\n").await;
        assert!(out.contains("> \nHammer\n\n> "));
    }

    #[tokio::test]
    async fn test_unknown_product_prints_nothing() {
        let (out, _) = transcript("Hammer,1", FakeVendor::default(), "p\nWrench\nq\n").await;
        assert!(out.contains("Product name: \n> "));
    }

    #[tokio::test]
    async fn test_bad_discount_reprompts() {
        let vendor = FakeVendor::default().with_price("1", 19.99);
        let (out, discount) =
            transcript("Lumber,1", vendor, "d\nhalf\n0.5\np\nLumber\nq\n").await;

        assert_eq!(discount.factor(), 0.5);
        assert!(out.contains("Invalid discount factor: \"half\" is not a number"));
        assert_eq!(out.matches(DISCOUNT_PROMPT).count(), 2);
        assert!(out.contains("\n$10.0\n"));
    }

    #[tokio::test]
    async fn test_unknown_commands_are_ignored() {
        let (out, _) = transcript("Hammer,1", FakeVendor::default(), "x\n\nhelp\nq\n").await;
        assert_eq!(out.matches("\n> ").count(), 4);
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let (out, discount) = transcript("Hammer,1", FakeVendor::default(), "l\nd\n").await;
        assert!(out.contains("\nHammer\n"));
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(discount, Discount::NONE);
    }
}
