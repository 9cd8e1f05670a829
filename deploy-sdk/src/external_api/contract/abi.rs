use alloy::{
    dyn_abi::{DynSolValue, FunctionExt as _, JsonAbiExt as _},
    json_abi::{Function, JsonAbi},
    primitives::Bytes,
};

use super::error::BlockchainError;

/// Picks the overload of `name` that takes `arg_count` arguments.
pub fn find_function<'a>(
    abi: &'a JsonAbi,
    name: &str,
    arg_count: usize,
) -> Result<&'a Function, BlockchainError> {
    abi.function(name)
        .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == arg_count))
        .ok_or_else(|| BlockchainError::FunctionNotFound(name.to_string(), arg_count))
}

/// Selector-prefixed calldata for `name(args)`.
pub fn encode_function_call(
    abi: &JsonAbi,
    name: &str,
    args: &[DynSolValue],
) -> Result<Bytes, BlockchainError> {
    let function = find_function(abi, name, args.len())?;
    let data = function
        .abi_encode_input(args)
        .map_err(|e| BlockchainError::EncodeCallDataError(format!("{name}: {e}")))?;
    Ok(data.into())
}

/// Decodes the return data of `name`. A single return value is returned as is, several
/// are wrapped in a tuple.
pub fn decode_function_output(
    abi: &JsonAbi,
    name: &str,
    arg_count: usize,
    data: &[u8],
) -> Result<DynSolValue, BlockchainError> {
    let function = find_function(abi, name, arg_count)?;
    let mut values = function
        .abi_decode_output(data)
        .map_err(|e| BlockchainError::DecodeReturnDataError(format!("{name}: {e}")))?;
    if values.len() == 1 {
        return Ok(values.remove(0));
    }
    Ok(DynSolValue::Tuple(values))
}

/// ABI-encoded constructor arguments, to be appended to the creation bytecode.
pub fn encode_constructor_args(
    abi: &JsonAbi,
    args: &[DynSolValue],
) -> Result<Bytes, BlockchainError> {
    match abi.constructor() {
        Some(constructor) => {
            if constructor.inputs.len() != args.len() {
                return Err(BlockchainError::FunctionNotFound(
                    "constructor".to_string(),
                    args.len(),
                ));
            }
            let data = constructor
                .abi_encode_input(args)
                .map_err(|e| BlockchainError::EncodeCallDataError(format!("constructor: {e}")))?;
            Ok(data.into())
        }
        None if args.is_empty() => Ok(Bytes::new()),
        None => Err(BlockchainError::FunctionNotFound(
            "constructor".to_string(),
            args.len(),
        )),
    }
}
