/// Recommended error type for benchmark suite `main` functions and scenario selectors. This type
/// is compatible with the errors produced by the runner so you can use `?` to propagate them.
pub type ForkbenchResult<T> = anyhow::Result<T>;
