use alloy::{
    dyn_abi::DynSolValue,
    primitives::{address, Address, B256},
};
use async_trait::async_trait;
use serde::Deserialize;

use crate::deployments::interface::{
    DeployOptions, DeployResult, DeploymentBackend, ProxyOptions, TxOptions,
};

use super::{error::ScriptError, DeployEnvironment, DeployScript};

/// MAGIC token on Arbitrum Rinkeby.
pub const MAGIC_ADDRESS: Address = address!("0x7693604341fDC5B73c920b8825518Ec9b6bBbb8b");
pub const NEW_OWNER: Address = address!("0x3D210e741cDeDeA81efCd9711Ce7ef7FEe45684B");
pub const CONTRACT_NAME: &str = "MasterOfCoin";
pub const ADMIN_ROLE_ACCESSOR: &str = "MASTER_OF_COIN_ADMIN_ROLE";
pub const INIT_METHOD: &str = "init";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MasterOfCoinConfig {
    #[serde(default = "default_contract_name")]
    pub contract_name: String,

    #[serde(default = "default_init_method")]
    pub init_method: String,

    /// Sole argument of the proxy initializer.
    #[serde(default = "default_magic_address")]
    pub magic_address: Address,

    /// Account that must end up holding the admin role.
    #[serde(default = "default_new_owner")]
    pub new_owner: Address,

    #[serde(default = "default_admin_role_accessor")]
    pub admin_role_accessor: String,
}

fn default_contract_name() -> String {
    CONTRACT_NAME.to_string()
}

fn default_init_method() -> String {
    INIT_METHOD.to_string()
}

fn default_magic_address() -> Address {
    MAGIC_ADDRESS
}

fn default_new_owner() -> Address {
    NEW_OWNER
}

fn default_admin_role_accessor() -> String {
    ADMIN_ROLE_ACCESSOR.to_string()
}

impl Default for MasterOfCoinConfig {
    fn default() -> Self {
        Self {
            contract_name: default_contract_name(),
            init_method: default_init_method(),
            magic_address: default_magic_address(),
            new_owner: default_new_owner(),
            admin_role_accessor: default_admin_role_accessor(),
        }
    }
}

impl MasterOfCoinConfig {
    /// Reads `MASTER_OF_COIN_*` variables, falling back to the Arbitrum Rinkeby values.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("MASTER_OF_COIN_").from_env()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoleGrant {
    Granted { transaction_hash: B256 },
    AlreadyGranted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasterOfCoinOutcome {
    pub deployment: DeployResult,
    pub admin_role: B256,
    pub grant: RoleGrant,
}

/// Deploys the contract behind a proxy initialized with the MAGIC address, then grants the
/// admin role to the new owner unless it already holds it.
pub async fn deploy_master_of_coin(
    deployments: &dyn DeploymentBackend,
    deployer: Address,
    config: &MasterOfCoinConfig,
) -> Result<MasterOfCoinOutcome, ScriptError> {
    let name = config.contract_name.as_str();
    let options = DeployOptions::new(deployer)
        .with_log(true)
        .with_proxy(ProxyOptions::with_execute(
            &config.init_method,
            vec![DynSolValue::Address(config.magic_address)],
        ));
    let deployment = deployments.deploy(name, &options).await?;

    let admin_role = deployments
        .read(name, &config.admin_role_accessor, &[])
        .await?;
    let admin_role = match admin_role {
        DynSolValue::FixedBytes(word, 32) => word,
        other => {
            return Err(ScriptError::UnexpectedReturnType {
                method: config.admin_role_accessor.clone(),
                value: format!("{other:?}"),
            })
        }
    };

    let role_args = [
        DynSolValue::FixedBytes(admin_role, 32),
        DynSolValue::Address(config.new_owner),
    ];
    let has_role = deployments.read(name, "hasRole", &role_args).await?;
    let has_role = has_role
        .as_bool()
        .ok_or_else(|| ScriptError::UnexpectedReturnType {
            method: "hasRole".to_string(),
            value: format!("{has_role:?}"),
        })?;

    let grant = if has_role {
        RoleGrant::AlreadyGranted
    } else {
        let tx_options = TxOptions {
            from: deployer,
            log: true,
        };
        let tx = deployments
            .execute(name, &tx_options, "grantRole", &role_args)
            .await?;
        RoleGrant::Granted {
            transaction_hash: tx.transaction_hash,
        }
    };

    Ok(MasterOfCoinOutcome {
        deployment,
        admin_role,
        grant,
    })
}

pub struct MasterOfCoinScript {
    config: MasterOfCoinConfig,
    tags: Vec<String>,
}

impl MasterOfCoinScript {
    pub fn new(config: MasterOfCoinConfig) -> Self {
        let tags = vec![config.contract_name.clone()];
        Self { config, tags }
    }
}

#[async_trait]
impl DeployScript for MasterOfCoinScript {
    fn name(&self) -> &str {
        &self.config.contract_name
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    async fn run(&self, env: &DeployEnvironment<'_>) -> Result<(), ScriptError> {
        let deployer = env.accounts.deployer()?;
        let outcome = deploy_master_of_coin(env.deployments, deployer, &self.config).await?;
        match outcome.grant {
            RoleGrant::Granted { transaction_hash } => log::info!(
                "{} granted {} to {} in {:?}",
                self.config.contract_name,
                self.config.admin_role_accessor,
                self.config.new_owner,
                transaction_hash
            ),
            RoleGrant::AlreadyGranted => log::debug!(
                "{} already holds {}",
                self.config.new_owner,
                self.config.admin_role_accessor
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use alloy::primitives::b256;
    use common::network::Network;
    use mockall::Sequence;

    use crate::{
        accounts::{NamedAccounts, DEPLOYER},
        deployments::{
            error::DeploymentError,
            interface::{MockDeploymentBackend, TxResult},
        },
        external_api::contract::error::BlockchainError,
    };

    use super::*;

    const DEPLOYER_ADDRESS: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const PROXY: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const ROLE: B256 = b256!("0x275f12656528ceae7cba2736a15cb4ce098fc404b67e9825ec13a82aaf8fabec");
    const GRANT_TX: B256 = b256!("0x00000000000000000000000000000000000000000000000000000000000000aa");

    fn deploy_result(newly_deployed: bool) -> DeployResult {
        DeployResult {
            name: CONTRACT_NAME.to_string(),
            address: PROXY,
            implementation: Some(Address::repeat_byte(0x11)),
            transaction_hash: Some(B256::repeat_byte(0x22)),
            newly_deployed,
        }
    }

    fn role_args() -> Vec<DynSolValue> {
        vec![
            DynSolValue::FixedBytes(ROLE, 32),
            DynSolValue::Address(NEW_OWNER),
        ]
    }

    fn expect_deploy(
        mock: &mut MockDeploymentBackend,
        seq: &mut Sequence,
        newly_deployed: bool,
    ) {
        mock.expect_deploy()
            .times(1)
            .in_sequence(seq)
            .withf(|name, options| {
                let execute = options
                    .proxy
                    .as_ref()
                    .and_then(|proxy| proxy.execute.as_ref());
                name == CONTRACT_NAME
                    && options.from == DEPLOYER_ADDRESS
                    && options.log
                    && options.args.is_empty()
                    && execute.is_some_and(|execute| {
                        execute.method_name == "init"
                            && execute.args == vec![DynSolValue::Address(MAGIC_ADDRESS)]
                    })
            })
            .returning(move |_, _| Ok(deploy_result(newly_deployed)));
    }

    fn expect_role_reads(mock: &mut MockDeploymentBackend, seq: &mut Sequence, has_role: bool) {
        mock.expect_read()
            .times(1)
            .in_sequence(seq)
            .withf(|name, method, args| {
                name == CONTRACT_NAME && method == ADMIN_ROLE_ACCESSOR && args.is_empty()
            })
            .returning(|_, _, _| Ok(DynSolValue::FixedBytes(ROLE, 32)));
        mock.expect_read()
            .times(1)
            .in_sequence(seq)
            .withf(|name, method, args| {
                name == CONTRACT_NAME && method == "hasRole" && args == role_args().as_slice()
            })
            .returning(move |_, _, _| Ok(DynSolValue::Bool(has_role)));
    }

    #[tokio::test]
    async fn test_fresh_deployment_grants_role_once() {
        let mut mock = MockDeploymentBackend::new();
        let mut seq = Sequence::new();
        expect_deploy(&mut mock, &mut seq, true);
        expect_role_reads(&mut mock, &mut seq, false);
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|name, options, method, args| {
                name == CONTRACT_NAME
                    && *options
                        == TxOptions {
                            from: DEPLOYER_ADDRESS,
                            log: true,
                        }
                    && method == "grantRole"
                    && args == role_args().as_slice()
            })
            .returning(|_, _, _, _| {
                Ok(TxResult {
                    transaction_hash: GRANT_TX,
                    block_number: Some(7),
                    gas_used: 51_000,
                })
            });

        let outcome =
            deploy_master_of_coin(&mock, DEPLOYER_ADDRESS, &MasterOfCoinConfig::default())
                .await
                .unwrap();
        assert_eq!(outcome.deployment, deploy_result(true));
        assert_eq!(outcome.admin_role, ROLE);
        assert_eq!(
            outcome.grant,
            RoleGrant::Granted {
                transaction_hash: GRANT_TX
            }
        );
    }

    #[tokio::test]
    async fn test_existing_grant_is_not_repeated() {
        let mut mock = MockDeploymentBackend::new();
        let mut seq = Sequence::new();
        expect_deploy(&mut mock, &mut seq, false);
        expect_role_reads(&mut mock, &mut seq, true);
        mock.expect_execute().times(0);

        let outcome =
            deploy_master_of_coin(&mock, DEPLOYER_ADDRESS, &MasterOfCoinConfig::default())
                .await
                .unwrap();
        assert!(!outcome.deployment.newly_deployed);
        assert_eq!(outcome.grant, RoleGrant::AlreadyGranted);
    }

    #[tokio::test]
    async fn test_failed_deploy_aborts_before_any_read() {
        let mut mock = MockDeploymentBackend::new();
        mock.expect_deploy().times(1).returning(|_, _| {
            Err(DeploymentError::BlockchainError(BlockchainError::RPCError(
                "connection refused".to_string(),
            )))
        });
        mock.expect_read().times(0);
        mock.expect_execute().times(0);

        let result =
            deploy_master_of_coin(&mock, DEPLOYER_ADDRESS, &MasterOfCoinConfig::default()).await;
        assert!(matches!(
            result,
            Err(ScriptError::DeploymentError(DeploymentError::BlockchainError(
                BlockchainError::RPCError(_)
            )))
        ));
    }

    #[tokio::test]
    async fn test_role_is_read_only_after_deploy_returned() {
        let deployed = Arc::new(AtomicBool::new(false));
        let mut mock = MockDeploymentBackend::new();
        let flag = deployed.clone();
        mock.expect_deploy().times(1).returning(move |_, _| {
            flag.store(true, Ordering::SeqCst);
            Ok(deploy_result(true))
        });
        let flag = deployed.clone();
        mock.expect_read()
            .withf(|_, method, _| method == ADMIN_ROLE_ACCESSOR)
            .times(1)
            .returning(move |_, _, _| {
                assert!(flag.load(Ordering::SeqCst));
                Ok(DynSolValue::FixedBytes(ROLE, 32))
            });
        mock.expect_read()
            .withf(|_, method, _| method == "hasRole")
            .times(1)
            .returning(|_, _, _| Ok(DynSolValue::Bool(true)));

        deploy_master_of_coin(&mock, DEPLOYER_ADDRESS, &MasterOfCoinConfig::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_role_read_aborts_before_grant() {
        let mut mock = MockDeploymentBackend::new();
        mock.expect_deploy()
            .times(1)
            .returning(|_, _| Ok(deploy_result(true)));
        mock.expect_read()
            .times(1)
            .returning(|name, _, _| Err(DeploymentError::DeploymentNotFound(name.to_string())));
        mock.expect_execute().times(0);

        let result =
            deploy_master_of_coin(&mock, DEPLOYER_ADDRESS, &MasterOfCoinConfig::default()).await;
        assert!(matches!(
            result,
            Err(ScriptError::DeploymentError(DeploymentError::DeploymentNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_non_bool_has_role_is_rejected() {
        let mut mock = MockDeploymentBackend::new();
        mock.expect_deploy()
            .returning(|_, _| Ok(deploy_result(false)));
        mock.expect_read()
            .withf(|_, method, _| method == ADMIN_ROLE_ACCESSOR)
            .returning(|_, _, _| Ok(DynSolValue::FixedBytes(ROLE, 32)));
        mock.expect_read()
            .withf(|_, method, _| method == "hasRole")
            .returning(|_, _, _| Ok(DynSolValue::Address(Address::ZERO)));
        mock.expect_execute().times(0);

        let result =
            deploy_master_of_coin(&mock, DEPLOYER_ADDRESS, &MasterOfCoinConfig::default()).await;
        assert!(matches!(
            result,
            Err(ScriptError::UnexpectedReturnType { method, .. }) if method == "hasRole"
        ));
    }

    #[tokio::test]
    async fn test_injected_config_is_used() {
        let config = MasterOfCoinConfig {
            magic_address: Address::repeat_byte(0x42),
            new_owner: Address::repeat_byte(0x43),
            ..Default::default()
        };
        let mut mock = MockDeploymentBackend::new();
        mock.expect_deploy()
            .withf(|_, options| {
                options.proxy.as_ref().and_then(|p| p.execute.as_ref()).is_some_and(|e| {
                    e.args == vec![DynSolValue::Address(Address::repeat_byte(0x42))]
                })
            })
            .returning(|_, _| Ok(deploy_result(true)));
        mock.expect_read()
            .withf(|_, method, _| method == ADMIN_ROLE_ACCESSOR)
            .returning(|_, _, _| Ok(DynSolValue::FixedBytes(ROLE, 32)));
        mock.expect_read()
            .withf(|_, method, args| {
                method == "hasRole" && args[1] == DynSolValue::Address(Address::repeat_byte(0x43))
            })
            .returning(|_, _, _| Ok(DynSolValue::Bool(false)));
        mock.expect_execute()
            .times(1)
            .withf(|_, _, _, args| args[1] == DynSolValue::Address(Address::repeat_byte(0x43)))
            .returning(|_, _, _, _| {
                Ok(TxResult {
                    transaction_hash: GRANT_TX,
                    block_number: None,
                    gas_used: 0,
                })
            });

        let outcome = deploy_master_of_coin(&mock, DEPLOYER_ADDRESS, &config)
            .await
            .unwrap();
        assert!(matches!(outcome.grant, RoleGrant::Granted { .. }));
    }

    #[tokio::test]
    async fn test_script_resolves_deployer_account() {
        let mut mock = MockDeploymentBackend::new();
        mock.expect_deploy().times(0);
        let accounts = NamedAccounts::new();
        let env = DeployEnvironment {
            network: Network::ArbitrumRinkeby,
            deployments: &mock,
            accounts: &accounts,
        };
        let script = MasterOfCoinScript::new(MasterOfCoinConfig::default());
        assert!(matches!(
            script.run(&env).await,
            Err(ScriptError::AccountError(_))
        ));

        let mut mock = MockDeploymentBackend::new();
        let mut seq = Sequence::new();
        expect_deploy(&mut mock, &mut seq, false);
        expect_role_reads(&mut mock, &mut seq, true);
        let accounts = NamedAccounts::new().with_account(DEPLOYER, DEPLOYER_ADDRESS);
        let env = DeployEnvironment {
            network: Network::ArbitrumRinkeby,
            deployments: &mock,
            accounts: &accounts,
        };
        script.run(&env).await.unwrap();
    }

    #[test]
    fn test_script_is_named_after_configured_contract() {
        let script = MasterOfCoinScript::new(MasterOfCoinConfig {
            contract_name: "MasterOfCoinV2".to_string(),
            ..Default::default()
        });
        assert_eq!(script.name(), "MasterOfCoinV2");
        assert_eq!(script.tags(), ["MasterOfCoinV2".to_string()]);

        let default_script = MasterOfCoinScript::new(MasterOfCoinConfig::default());
        assert_eq!(default_script.name(), CONTRACT_NAME);
    }

    #[test]
    fn test_config_from_env_vars() {
        let config: MasterOfCoinConfig = envy::prefixed("MASTER_OF_COIN_")
            .from_iter(vec![(
                "MASTER_OF_COIN_NEW_OWNER".to_string(),
                "0x0000000000000000000000000000000000000001".to_string(),
            )])
            .unwrap();
        assert_eq!(config.new_owner, Address::with_last_byte(1));
        assert_eq!(config.magic_address, MAGIC_ADDRESS);
        assert_eq!(config.contract_name, CONTRACT_NAME);
        assert_eq!(
            config,
            MasterOfCoinConfig {
                new_owner: Address::with_last_byte(1),
                ..Default::default()
            }
        );
    }
}
