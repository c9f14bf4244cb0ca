use std::env;
use std::fs;
use std::process;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: baca <plan.yaml> [output.yaml]");
        eprintln!("       baca --nested <plan.yaml> [output.yaml]");
        process::exit(1);
    }

    let mut nested = false;
    let mut input_path = &args[1];
    let mut output_path: Option<&String> = args.get(2);

    if args[1] == "--nested" {
        nested = true;
        if args.len() < 3 {
            eprintln!("Usage: baca --nested <plan.yaml> [output.yaml]");
            process::exit(1);
        }
        input_path = &args[2];
        output_path = args.get(3);
    }

    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading plan '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let result = if nested {
        baca::run_plan_nested(&source)
    } else {
        baca::run_plan(&source)
    };

    let yaml = match result {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("Plan error: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &yaml) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote divisions to {}", path);
        }
        None => {
            print!("{}", yaml);
        }
    }
}
