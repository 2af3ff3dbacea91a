#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// Wait for the function and return its response payload.
    Sync,
    /// Fire-and-forget; the service acknowledges with an empty payload.
    Async,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutcome {
    pub payload: Vec<u8>,
    pub function_error: Option<String>,
}

/// Seam for external clients that call a named function with a JSON argument
/// string. The concrete service client lives with whichever composition root
/// uses it.
pub trait FunctionInvoker {
    fn invoke(
        &self,
        function_name: &str,
        args_json: &[u8],
        mode: InvocationMode,
    ) -> Result<InvocationOutcome, String>;
}

/// Turns an invocation outcome into the response payload string, surfacing a
/// function-level error as a failure even though the service call itself
/// succeeded.
pub fn payload_or_error(outcome: InvocationOutcome) -> Result<String, String> {
    if let Some(kind) = outcome.function_error {
        let detail = String::from_utf8_lossy(&outcome.payload).into_owned();
        return Err(format!("function returned error ({kind}): {detail}"));
    }

    String::from_utf8(outcome.payload)
        .map_err(|error| format!("function response payload is not UTF-8: {error}"))
}
