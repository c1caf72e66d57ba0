use recipe_browser::{OutputFormat, cli_parse, display, exit_code, init_logging, run};

fn main() {
    let cli = cli_parse();
    let format = cli.format;
    init_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match format {
            OutputFormat::Json => println!("{}", display::format_error_json(&format!("{err:#}"))),
            OutputFormat::Text => eprintln!("Error: {err:#}"),
        }
        std::process::exit(exit_code(&err));
    }
}
