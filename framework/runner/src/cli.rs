use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
pub struct ForkbenchCli {
    /// The fully-qualified name of the benchmark suite to run
    pub suite: String,

    /// The number of milliseconds each child spends warming up before measuring
    #[clap(long, default_value = "3000")]
    pub warmup_millis: u64,

    /// The number of milliseconds each child spends measuring
    #[clap(long, default_value = "1000")]
    pub run_millis: u64,

    /// Where to post results after the run. Use `none` to disable posting.
    #[clap(long, default_value = "none")]
    pub post_host: String,

    /// The classpath under which child processes resolve the measurement entry point.
    ///
    /// Defaults to the `CLASSPATH` environment variable when not given.
    #[clap(long)]
    pub classpath: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_name_is_the_only_required_argument() {
        let cli = ForkbenchCli::try_parse_from(["forkbench", "examples.ArraySortBenchmark"])
            .expect("failed to parse arguments");
        assert_eq!(cli.suite, "examples.ArraySortBenchmark");
        assert_eq!(cli.warmup_millis, 3000);
        assert_eq!(cli.run_millis, 1000);
        assert_eq!(cli.post_host, "none");
        assert_eq!(cli.classpath, None);
    }

    #[test]
    fn timing_and_posting_can_be_overridden() {
        let cli = ForkbenchCli::try_parse_from([
            "forkbench",
            "--warmup-millis",
            "5000",
            "--run-millis",
            "2000",
            "--post-host",
            "http://collector.example/run/",
            "examples.ArraySortBenchmark",
        ])
        .expect("failed to parse arguments");
        assert_eq!(cli.warmup_millis, 5000);
        assert_eq!(cli.run_millis, 2000);
        assert_eq!(cli.post_host, "http://collector.example/run/");
    }

    #[test]
    fn missing_suite_is_rejected() {
        assert!(ForkbenchCli::try_parse_from(["forkbench"]).is_err());
    }
}
