use alloy::{dyn_abi::DynSolValue, primitives::Address};
use deploy_sdk::{
    deployments::interface::DeploymentBackend as _,
    scripts::{
        master_of_coin::{deploy_master_of_coin, MasterOfCoinConfig, RoleGrant},
        registry::default_registry,
        DeployEnvironment,
    },
};
use tests::setup;

// Requires a node at RPC_URL and compiled MasterOfCoin and ERC1967Proxy artifacts.
#[tokio::test]
#[ignore]
async fn deploy_master_of_coin_twice() -> anyhow::Result<()> {
    let setup = setup().await?;
    let deployer = setup.accounts.deployer()?;
    let config = MasterOfCoinConfig {
        new_owner: Address::random(),
        ..Default::default()
    };

    let first = deploy_master_of_coin(&setup.deployments, deployer, &config).await?;
    assert!(first.deployment.newly_deployed);
    assert!(first.deployment.implementation.is_some());
    assert!(matches!(first.grant, RoleGrant::Granted { .. }));
    println!("MasterOfCoin proxy address: {:?}", first.deployment.address);

    let second = deploy_master_of_coin(&setup.deployments, deployer, &config).await?;
    assert!(!second.deployment.newly_deployed);
    assert_eq!(second.deployment.address, first.deployment.address);
    assert_eq!(second.admin_role, first.admin_role);
    assert_eq!(second.grant, RoleGrant::AlreadyGranted);

    let names = setup
        .deployments
        .store()
        .list()?
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "MasterOfCoin",
            "MasterOfCoin_Implementation",
            "MasterOfCoin_Proxy"
        ]
    );
    std::fs::remove_dir_all(&setup.deployments_dir)?;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn run_registry_against_node() -> anyhow::Result<()> {
    let setup = setup().await?;
    let config = MasterOfCoinConfig {
        new_owner: Address::random(),
        ..Default::default()
    };
    let registry = default_registry(config.clone());
    let env = DeployEnvironment {
        network: setup.network,
        deployments: &setup.deployments,
        accounts: &setup.accounts,
    };
    let executed = registry.run(&env, &["MasterOfCoin".to_string()]).await?;
    assert_eq!(executed, vec!["MasterOfCoin"]);

    let admin_role = setup
        .deployments
        .read("MasterOfCoin", &config.admin_role_accessor, &[])
        .await?;
    let has_role = setup
        .deployments
        .read(
            "MasterOfCoin",
            "hasRole",
            &[admin_role, DynSolValue::Address(config.new_owner)],
        )
        .await?;
    assert_eq!(has_role.as_bool(), Some(true));
    std::fs::remove_dir_all(&setup.deployments_dir)?;
    Ok(())
}
