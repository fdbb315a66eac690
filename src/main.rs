use s3_storage::{args, run_app};

fn main() {
    // Parse command-line arguments
    let args = args::args_checks();

    match run_app(&args) {
        Ok(Some(value)) => println!("{value}"),
        Ok(None) => {
            // Same sentinel the library hands back; details are printed with -v
            println!("false");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Application error: {e}");
            std::process::exit(2);
        }
    }
}
