//! Contract ABIs used by the front end.

use alloy_sol_types::sol;

sol! {
    interface IERC20 {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

sol! {
    /// Uniswap V3 QuoterV2
    interface IQuoterV2 {
        struct QuoteExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint256 amountIn;
            uint24 fee;
            uint160 sqrtPriceLimitX96;
        }

        function quoteExactInputSingle(QuoteExactInputSingleParams memory params)
            external
            returns (
                uint256 amountOut,
                uint160 sqrtPriceX96After,
                uint32 initializedTicksCrossed,
                uint256 gasEstimate
            );
    }
}

sol! {
    /// Uniswap SwapRouter02. `exactInputSingle` carries no deadline; it is
    /// enforced by wrapping the call in `multicall(deadline, ...)`.
    interface ISwapRouter02 {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        function exactInputSingle(ExactInputSingleParams calldata params)
            external
            payable
            returns (uint256 amountOut);

        function multicall(uint256 deadline, bytes[] calldata data)
            external
            payable
            returns (bytes[] memory results);
    }
}

sol! {
    /// Limit order book. Buy orders escrow native currency, sell orders
    /// escrow the input token; prices are USD with 6 decimals.
    interface ILimitOrder {
        struct Order {
            uint8 odt;
            address tokenIn;
            address tokenOut;
            uint256 amountIn;
            uint256 priceUSD;
            address user;
            bool executed;
        }

        event OrderCreated(uint256 indexed orderId, address indexed user, uint8 odt);

        function buyOrder(address tokenOut, uint256 priceUSD) external payable;
        function sellOrder(address tokenIn, uint256 priceUSD, uint256 amountIn) external;
        function cancelOrder(uint256 orderId) external;
        function viewMyOrders() external view returns (Order[] memory);
    }
}
