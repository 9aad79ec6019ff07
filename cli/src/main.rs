//! `rd`: RapidDeploy command line client

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::process::exit(rdcli::cli::run().await);
}
