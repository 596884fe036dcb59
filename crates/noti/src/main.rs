use tokio::runtime::Builder;

use noti::cli::Cli;
use noti::env::Env;
use noti::git::GitCli;
use noti::logging;
use noti::run::run;
use noti::sink::Notifier;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_or_exit();
    logging::init(cli.verbose)?;
    let env = Env::from_process();

    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(async {
        let describer = GitCli::locate();
        let notifier = Notifier::new();
        let mut stdout = std::io::stdout().lock();
        run(cli.status, &cli.manifest, &env, &describer, &notifier, &mut stdout).await?;
        Ok(())
    })
}
