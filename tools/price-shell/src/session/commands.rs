/// A single menu command typed at the `>` prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `p` - price one product by name
    Price,
    /// `l` - list product names
    List,
    /// `a` - price every product
    All,
    /// `d` - set the discount factor
    Discount,
    /// `h` / `?` - show the menu again
    Help,
    /// `q` - leave the session
    Quit,
    /// Anything else; ignored
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "p" => Command::Price,
            "l" => Command::List,
            "a" => Command::All,
            "d" => Command::Discount,
            "h" | "?" => Command::Help,
            "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub const MENU: &str = "Choose an option:
    p: get the price of a product
    l: list all available products
    a: get the prices of all listed products
    d: set the discount factor
    q: quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("p"), Command::Price);
        assert_eq!(Command::parse("l\n"), Command::List);
        assert_eq!(Command::parse(" a "), Command::All);
        assert_eq!(Command::parse("d"), Command::Discount);
        assert_eq!(Command::parse("?"), Command::Help);
        assert_eq!(Command::parse("q"), Command::Quit);
    }

    #[test]
    fn test_commands_are_case_sensitive() {
        assert_eq!(Command::parse("Q"), Command::Unknown("Q".to_string()));
        assert_eq!(Command::parse("price"), Command::Unknown("price".to_string()));
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    }
}
